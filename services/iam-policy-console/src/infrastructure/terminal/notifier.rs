//! 终端通知输出

use std::io::Write;
use std::sync::Mutex;

use console::Style;
use cuba_ports::{Notification, NotificationLevel, Notifier};

/// 把通知写到 stderr，可选着色
pub struct TerminalNotifier<W: Write + Send = std::io::Stderr> {
    out: Mutex<W>,
    color: bool,
}

impl TerminalNotifier {
    /// 是否着色取决于 stderr 是否为终端以及 `NO_COLOR` / `CLICOLOR` 设置
    pub fn stderr() -> Self {
        Self::new(std::io::stderr(), console::colors_enabled_stderr())
    }
}

impl<W: Write + Send> TerminalNotifier<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out: Mutex::new(out),
            color,
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn label(level: NotificationLevel) -> (&'static str, Style) {
    match level {
        NotificationLevel::Success => ("ok", Style::new().green()),
        NotificationLevel::Error => ("error", Style::new().red().bold()),
        NotificationLevel::Warning => ("warning", Style::new().yellow()),
        NotificationLevel::Info => ("info", Style::new().cyan()),
    }
}

impl<W: Write + Send> Notifier for TerminalNotifier<W> {
    fn notify(&self, notification: Notification) {
        let (text, style) = label(notification.level);
        let line = format!(
            "{}: {}",
            style.force_styling(self.color).apply_to(text),
            notification.message
        );

        // 通知是即发即忘的，写失败直接忽略
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{}", line);
        }
    }
}
