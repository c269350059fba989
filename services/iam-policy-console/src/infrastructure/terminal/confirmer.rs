//! 终端确认提示

use console::{Term, style};
use cuba_ports::{ConfirmationPrompt, ConfirmVariant, Confirmer};
use dialoguer::Confirm;
use tracing::warn;

/// 在 stderr 上交互式确认；`assume_yes` 时跳过提问直接确认
///
/// 非交互终端上无法提问，按取消处理。
pub struct TerminalConfirmer {
    assume_yes: bool,
}

impl TerminalConfirmer {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    /// 提示文本：标题 + 说明 + 确认按钮文字
    pub fn prompt_text(prompt: &ConfirmationPrompt) -> String {
        let title = style(prompt.title.as_str()).for_stderr().bold();
        let title = match prompt.variant {
            ConfirmVariant::Danger => title.red(),
            ConfirmVariant::Warning => title.yellow(),
            ConfirmVariant::Info => title,
        };
        format!("{}\n{}\n{}?", title, prompt.message, prompt.confirm_text)
    }

    fn ask(&self, prompt: &ConfirmationPrompt, term: &Term) -> bool {
        if self.assume_yes {
            return true;
        }
        if !term.is_term() {
            warn!(title = %prompt.title, "Confirmation requires an interactive terminal, use --yes");
            return false;
        }

        match Confirm::new()
            .with_prompt(Self::prompt_text(prompt))
            .default(false)
            .interact_on_opt(term)
        {
            Ok(answer) => answer.unwrap_or(false),
            Err(e) => {
                warn!(error = %e, "Confirmation prompt failed");
                false
            }
        }
    }
}

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, prompt: &ConfirmationPrompt) -> bool {
        self.ask(prompt, &Term::stderr())
    }
}
