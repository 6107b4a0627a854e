//! Transient corner notification. The page shows at most one at a time; the
//! parent holds an `Option` and simply replaces it, which unmounts the old
//! notification and cancels its timer.

use gloo_timers::callback::Timeout;
use yew::prelude::*;

const AUTO_DISMISS_MS: u32 = 5_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    fn background(&self) -> &'static str {
        match self {
            NotificationKind::Success => "#10b981",
            NotificationKind::Error => "#ef4444",
            NotificationKind::Info => "#3b82f6",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct NotificationProps {
    pub kind: NotificationKind,
    pub message: String,
    /// Distinguishes successive notifications, so showing the same message
    /// twice still restarts the dismiss timer.
    pub nonce: u32,
    pub on_dismiss: Callback<()>,
}

#[function_component(Notification)]
pub fn notification(props: &NotificationProps) -> Html {
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with_deps(
            move |_| {
                let timeout = Timeout::new(AUTO_DISMISS_MS, move || {
                    on_dismiss.emit(());
                });
                // Dropping the handle on unmount cancels the timer.
                move || drop(timeout)
            },
            props.nonce,
        );
    }

    let close = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(()))
    };

    html! {
        <div
            class={format!("notification notification-{}", match props.kind {
                NotificationKind::Success => "success",
                NotificationKind::Error => "error",
                NotificationKind::Info => "info",
            })}
            style={format!(
                "position: fixed; top: 100px; right: 20px; background: {}; color: white; \
                 padding: 1rem 1.5rem; border-radius: 8px; \
                 box-shadow: 0 10px 15px -3px rgba(0, 0, 0, 0.1); z-index: 10000; \
                 max-width: 400px; animation: slideInRight 0.3s ease;",
                props.kind.background()
            )}
        >
            <style>
                {r#"
                    @keyframes slideInRight {
                        from { transform: translateX(100%); opacity: 0; }
                        to { transform: translateX(0); opacity: 1; }
                    }
                    .notification-content {
                        display: flex;
                        justify-content: space-between;
                        align-items: center;
                    }
                    .notification-close {
                        background: none;
                        border: none;
                        color: white;
                        font-size: 1.5rem;
                        cursor: pointer;
                        margin-left: 1rem;
                    }
                    .notification-close:hover {
                        opacity: 0.8;
                    }
                "#}
            </style>
            <div class="notification-content">
                <span>{ &props.message }</span>
                <button class="notification-close" onclick={close}>{ "\u{00d7}" }</button>
            </div>
        </div>
    }
}
