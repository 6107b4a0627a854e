//! Cookie-consent banner. Rendering and event wiring only; the actual state
//! machine lives in `crate::consent` and is shared with the tests there.

use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::config::LocaleConfig;
use crate::consent::{ConsentManager, GtagSink, LocalStorageConsent};

#[derive(Properties, PartialEq)]
pub struct CookieBannerProps {
    pub config: &'static LocaleConfig,
}

#[function_component(CookieBanner)]
pub fn cookie_banner(props: &CookieBannerProps) -> Html {
    let manager = use_mut_ref({
        let tracking_id = props.config.ga_tracking_id;
        move || ConsentManager::new(LocalStorageConsent, GtagSink::new(tracking_id))
    });
    let visible = use_state({
        let manager = manager.clone();
        move || manager.borrow().needs_banner()
    });
    let analytics_checked = use_state(|| false);

    // A persisted choice is re-applied once on load, without the banner.
    {
        let manager = manager.clone();
        use_effect_with_deps(
            move |_| {
                manager.borrow().apply_stored();
                || ()
            },
            (),
        );
    }

    // Reserve space below the content while the banner is open.
    {
        let visible_now = *visible;
        use_effect_with_deps(
            move |open| {
                if let Some(body) = web_sys::window()
                    .and_then(|w| w.document())
                    .and_then(|d| d.body())
                {
                    let _ = if *open {
                        body.class_list().add_1("cookie-banner-open")
                    } else {
                        body.class_list().remove_1("cookie-banner-open")
                    };
                }
                || ()
            },
            visible_now,
        );
    }

    let choose = |action: fn(&ConsentManager<LocalStorageConsent, GtagSink>, bool) -> bool| {
        let manager = manager.clone();
        let visible = visible.clone();
        let analytics_checked = analytics_checked.clone();
        Callback::from(move |_: MouseEvent| {
            if action(&manager.borrow(), *analytics_checked) {
                visible.set(false);
            }
        })
    };

    let accept_all = choose(|manager, _| match manager.accept_all() {
        Ok(_) => true,
        Err(err) => {
            log::error!("storing consent failed: {err}");
            false
        }
    });
    let accept_selected = choose(|manager, checked| match manager.accept_selected(checked) {
        Ok(_) => true,
        Err(err) => {
            log::error!("storing consent failed: {err}");
            false
        }
    });
    let reject_all = choose(|manager, _| match manager.reject_all() {
        Ok(_) => true,
        Err(err) => {
            log::error!("storing consent failed: {err}");
            false
        }
    });

    let on_analytics_toggle = {
        let analytics_checked = analytics_checked.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            analytics_checked.set(input.checked());
        })
    };

    if !*visible {
        return html! {};
    }

    let texts = &props.config.cookie_consent;

    html! {
        <div class="cookie-banner">
            <style>
                {r#"
                    .cookie-banner {
                        position: fixed;
                        bottom: 0;
                        left: 0;
                        width: 100%;
                        background: rgba(26, 26, 26, 0.98);
                        color: #eee;
                        padding: 1.5rem 2rem;
                        z-index: 9000;
                        box-shadow: 0 -4px 12px rgba(0, 0, 0, 0.3);
                    }
                    .cookie-banner h4 {
                        margin: 0 0 0.5rem 0;
                    }
                    .cookie-banner p {
                        margin: 0 0 1rem 0;
                        color: rgba(255, 255, 255, 0.8);
                        font-size: 0.9rem;
                    }
                    .cookie-banner label {
                        display: block;
                        margin-bottom: 0.5rem;
                        font-size: 0.9rem;
                    }
                    .cookie-banner .cookie-actions {
                        display: flex;
                        gap: 0.75rem;
                        flex-wrap: wrap;
                        margin-top: 1rem;
                    }
                    .cookie-banner button {
                        padding: 0.6rem 1.2rem;
                        border-radius: 6px;
                        border: none;
                        cursor: pointer;
                    }
                    .cookie-banner .accept-all {
                        background: #10b981;
                        color: white;
                    }
                    .cookie-banner .accept-selected {
                        background: #3b82f6;
                        color: white;
                    }
                    .cookie-banner .reject {
                        background: transparent;
                        color: #eee;
                        border: 1px solid rgba(255, 255, 255, 0.4);
                    }
                    body.cookie-banner-open {
                        padding-bottom: 200px;
                    }
                    @media (max-width: 768px) {
                        body.cookie-banner-open {
                            padding-bottom: 250px;
                        }
                    }
                "#}
            </style>
            <h4>{ texts.title }</h4>
            <p>{ texts.description }</p>
            <label>
                <input type="checkbox" checked={true} disabled={true} />
                <span>{ texts.necessary }</span>
            </label>
            <label>
                <input
                    type="checkbox"
                    checked={*analytics_checked}
                    onchange={on_analytics_toggle}
                />
                <span>{ texts.analytics }</span>
            </label>
            <div class="cookie-actions">
                <button class="accept-all" onclick={accept_all}>{ texts.accept_all }</button>
                <button class="accept-selected" onclick={accept_selected}>{ texts.accept_selected }</button>
                <button class="reject" onclick={reject_all}>{ texts.reject }</button>
            </div>
        </div>
    }
}
