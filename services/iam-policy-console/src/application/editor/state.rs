//! 控制台视图状态

use crate::domain::policy::PolicyId;

/// 控制台当前所处的视图
///
/// 保存中/测试中是编辑器上的瞬时标志，不是独立视图，见 [`super::EditorSession`]。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConsoleView {
    #[default]
    ViewingList,
    /// 编辑尚未保存的空草稿
    Creating,
    /// 编辑已有后端 ID 的策略
    Editing(PolicyId),
}
