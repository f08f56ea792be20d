use std::future::Future;

use dioxus::prelude::*;

/// Handle for "latest wins" submissions.
///
/// Starting a new task cancels the one still in flight. Tasks are spawned
/// in the calling component's scope, so unmounting cancels them too.
#[derive(Clone, Copy, PartialEq)]
pub struct LatestTask {
    current: Signal<Option<Task>>,
}

impl LatestTask {
    pub fn run(&mut self, future: impl Future<Output = ()> + 'static) {
        self.cancel();
        let task = spawn(future);
        self.current.set(Some(task));
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.current.write().take() {
            task.cancel();
        }
    }
}

pub fn use_latest_task() -> LatestTask {
    let current = use_signal(|| None);
    LatestTask { current }
}
