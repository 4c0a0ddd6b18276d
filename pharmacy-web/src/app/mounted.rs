//! Delayed service responses may land after the page that asked for them
//! is gone. The persisted effect stands; the UI update is dropped.
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;

/// Cleared when the owning component unmounts.
#[derive(Clone, Debug)]
pub struct MountFlag(Rc<Cell<bool>>);

impl MountFlag {
    #[must_use]
    pub fn mounted() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn unmount(&self) {
        self.0.set(false);
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.0.get()
    }

    /// Hand back `response` only while the page is still on screen.
    #[must_use]
    pub fn admit<T>(&self, response: T) -> Option<T> {
        if self.is_mounted() {
            Some(response)
        } else {
            log::debug!("response arrived after unmount; dropping UI update");
            None
        }
    }
}

impl PartialEq for MountFlag {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[hook]
pub fn use_mount_flag() -> MountFlag {
    let flag = (*use_memo((), |()| MountFlag::mounted())).clone();
    {
        let flag = flag.clone();
        use_effect_with((), move |()| move || flag.unmount());
    }
    flag
}

/// Run `task` and pass its output to `apply` if `flag` is still mounted.
pub fn spawn_guarded<F, T>(flag: MountFlag, task: F, apply: impl FnOnce(T) + 'static)
where
    F: Future<Output = T> + 'static,
    T: 'static,
{
    yew::platform::spawn_local(async move {
        let output = task.await;
        if let Some(output) = flag.admit(output) {
            apply(output);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn responses_apply_only_while_mounted() {
        let flag = MountFlag::mounted();
        assert_eq!(flag.admit("ordered"), Some("ordered"));
        let copy = flag.clone();
        flag.unmount();
        assert!(!copy.is_mounted());
        assert_eq!(copy.admit("ordered"), None);
    }

    #[test]
    fn flags_compare_by_identity() {
        let flag = MountFlag::mounted();
        assert_eq!(flag, flag.clone());
        assert_ne!(flag, MountFlag::mounted());
    }
}
