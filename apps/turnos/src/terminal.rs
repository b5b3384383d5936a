use std::sync::{Mutex, PoisonError};

use tracing::info;

use shared_models::ui::{Navigator, Notice, NoticeLevel, Notifier, Route};

/// Prints notices to stdout as they arrive.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        println!("{}", format_notice(&notice));
    }
}

pub fn format_notice(notice: &Notice) -> String {
    let tag = match notice.level {
        NoticeLevel::Success => "OK",
        NoticeLevel::Warning => "AVISO",
        NoticeLevel::Error => "ERROR",
    };

    match &notice.title {
        Some(title) => format!("[{}] {}: {}", tag, title, notice.message),
        None => format!("[{}] {}", tag, notice.message),
    }
}

/// There is no page stack in a terminal; the requested route is remembered
/// and shown as a hint.
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    last: Mutex<Option<Route>>,
}

impl TerminalNavigator {
    pub fn last(&self) -> Option<Route> {
        self.last.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        info!("Navigation requested to {}", route);
        println!("-> {}", route);
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(route);
    }
}
