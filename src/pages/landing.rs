use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::cookie_banner::CookieBanner;
use crate::components::notification::{Notification, NotificationKind};
use crate::config::ConfigStore;
use crate::emailjs;
use crate::form::{run_submission, FormSubmission, SubmissionOutcome, SubmissionUiState};

#[derive(Properties, PartialEq)]
pub struct LandingProps {
    pub store: ConfigStore,
}

fn scroll_to_section(id: &str) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        if let Some(element) = document.get_element_by_id(id) {
            let mut options = web_sys::ScrollIntoViewOptions::new();
            options.behavior(web_sys::ScrollBehavior::Smooth);
            element.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }
}

fn anchor(id: &'static str) -> Callback<MouseEvent> {
    Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        scroll_to_section(id);
    })
}

#[function_component(Landing)]
pub fn landing(props: &LandingProps) -> Html {
    let store = props.store;
    let config = store.current();

    let is_scrolled = use_state(|| false);
    let name = use_state(String::new);
    let email = use_state(String::new);
    let company = use_state(String::new);
    let service = use_state(String::new);
    let message = use_state(String::new);
    let ui_state = use_state(|| SubmissionUiState::Idle);
    let in_flight = use_mut_ref(|| false);
    let notification = use_state(|| None::<(u32, NotificationKind, String)>);
    let notice_seq = use_mut_ref(|| 0u32);

    // Document metadata comes from the active locale config.
    {
        use_effect_with_deps(
            move |_| {
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    document.set_title(config.title);
                    if let Some(root) = document.document_element() {
                        let _ = root.set_attribute("lang", config.lang);
                    }
                    if let Some(meta) = document
                        .query_selector("meta[name='description']")
                        .ok()
                        .flatten()
                    {
                        let _ = meta.set_attribute("content", config.description);
                    }
                }
                || ()
            },
            (),
        );
    }

    // Nav background switch on scroll.
    {
        let is_scrolled = is_scrolled.clone();
        use_effect_with_deps(
            move |_| {
                let window = web_sys::window().unwrap();
                let window_clone = window.clone();
                let scroll_callback = Closure::wrap(Box::new(move || {
                    is_scrolled.set(window_clone.scroll_y().unwrap_or(0.0) > 100.0);
                }) as Box<dyn FnMut()>);

                window
                    .add_event_listener_with_callback(
                        "scroll",
                        scroll_callback.as_ref().unchecked_ref(),
                    )
                    .unwrap();

                move || {
                    window
                        .remove_event_listener_with_callback(
                            "scroll",
                            scroll_callback.as_ref().unchecked_ref(),
                        )
                        .unwrap();
                }
            },
            (),
        );
    }

    // Reveal animation for the service cards.
    {
        use_effect_with_deps(
            move |_| {
                let document = web_sys::window().and_then(|w| w.document());
                let reveal_callback = Closure::wrap(Box::new(move |entries: js_sys::Array| {
                    for entry in entries.iter() {
                        let entry: web_sys::IntersectionObserverEntry = entry.unchecked_into();
                        if entry.is_intersecting() {
                            let _ = entry.target().class_list().add_1("visible");
                        }
                    }
                })
                    as Box<dyn FnMut(js_sys::Array)>);

                let observer =
                    web_sys::IntersectionObserver::new(reveal_callback.as_ref().unchecked_ref())
                        .ok();
                if let (Some(document), Some(observer)) = (document, observer.as_ref()) {
                    if let Ok(cards) = document.query_selector_all(".service-card") {
                        for i in 0..cards.length() {
                            if let Some(card) = cards.get(i).and_then(|n| n.dyn_into().ok()) {
                                observer.observe(&card);
                            }
                        }
                    }
                }

                move || {
                    if let Some(observer) = observer {
                        observer.disconnect();
                    }
                    drop(reveal_callback);
                }
            },
            (),
        );
    }

    let dismiss_notification = {
        let notification = notification.clone();
        Callback::from(move |_| notification.set(None))
    };

    let onsubmit = {
        let name = name.clone();
        let email = email.clone();
        let company = company.clone();
        let service = service.clone();
        let message = message.clone();
        let ui_state = ui_state.clone();
        let in_flight = in_flight.clone();
        let notification = notification.clone();
        let notice_seq = notice_seq.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            // Only the trigger that takes ownership of the flag may clear
            // it again; duplicates leave it untouched.
            let state = if *in_flight.borrow() {
                SubmissionUiState::Submitting
            } else {
                *in_flight.borrow_mut() = true;
                SubmissionUiState::Idle
            };
            let values = FormSubmission {
                name: (*name).clone(),
                email: (*email).clone(),
                company: (*company).clone(),
                service: (*service).clone(),
                message: (*message).clone(),
            };
            let form: Option<HtmlFormElement> = e.target_dyn_into();

            let name = name.clone();
            let email = email.clone();
            let company = company.clone();
            let service = service.clone();
            let message = message.clone();
            let ui_state = ui_state.clone();
            let in_flight = in_flight.clone();
            let notification = notification.clone();
            let notice_seq = notice_seq.clone();

            wasm_bindgen_futures::spawn_local(async move {
                let outcome = run_submission(
                    &values,
                    state,
                    config,
                    {
                        let ui_state = ui_state.clone();
                        move || ui_state.set(SubmissionUiState::Submitting)
                    },
                    emailjs::send,
                )
                .await;

                // A dropped duplicate leaves everything, including the
                // in-flight flag, to the submission that owns it.
                let Some(effects) = outcome.effects(config) else {
                    return;
                };

                if let SubmissionOutcome::Failed(err) = &outcome {
                    // Generic message for the user, detail for operators.
                    gloo_console::error!("delivery failed:", err.to_string());
                }
                if effects.clear_fields {
                    name.set(String::new());
                    email.set(String::new());
                    company.set(String::new());
                    service.set(String::new());
                    message.set(String::new());
                    if let Some(form) = form {
                        form.reset();
                    }
                }

                let kind = if effects.success {
                    NotificationKind::Success
                } else {
                    NotificationKind::Error
                };
                let nonce = {
                    let mut seq = notice_seq.borrow_mut();
                    *seq = seq.wrapping_add(1);
                    *seq
                };
                notification.set(Some((nonce, kind, effects.message)));

                ui_state.set(effects.transient);
                ui_state.set(effects.settled);
                *in_flight.borrow_mut() = false;
            });
        })
    };

    let submitting = *ui_state == SubmissionUiState::Submitting;
    let nav_class = if *is_scrolled {
        "top-nav scrolled"
    } else {
        "top-nav"
    };
    let services = &config.services;

    html! {
        <div class="landing">
            <style>
                {r#"
                    .landing {
                        font-family: 'Segoe UI', Roboto, Helvetica, Arial, sans-serif;
                        color: #1f2937;
                    }
                    .top-nav {
                        position: fixed;
                        top: 0;
                        left: 0;
                        width: 100%;
                        display: flex;
                        align-items: center;
                        justify-content: space-between;
                        padding: 1rem 2rem;
                        background: rgba(255, 255, 255, 0.95);
                        z-index: 1000;
                        transition: background 0.3s ease, box-shadow 0.3s ease;
                    }
                    .top-nav.scrolled {
                        background: rgba(255, 255, 255, 0.98);
                        box-shadow: 0 4px 6px -1px rgba(0, 0, 0, 0.1);
                    }
                    .top-nav .nav-links a {
                        margin-left: 1.5rem;
                        color: #1f2937;
                        text-decoration: none;
                    }
                    .top-nav .nav-logo {
                        font-weight: bold;
                        font-size: 1.2rem;
                    }
                    .hero {
                        padding: 10rem 2rem 6rem;
                        text-align: center;
                        background: linear-gradient(180deg, #f8fafc 0%, #e2e8f0 100%);
                    }
                    .hero h1 {
                        max-width: 48rem;
                        margin: 0 auto 1.5rem;
                    }
                    .hero p {
                        max-width: 40rem;
                        margin: 0 auto 2rem;
                        color: #475569;
                    }
                    .cta-button, .cta-button-large, .submit-button {
                        background: #2563eb;
                        color: white;
                        border: none;
                        border-radius: 8px;
                        padding: 0.8rem 1.6rem;
                        cursor: pointer;
                        font-size: 1rem;
                    }
                    .cta-button-large {
                        padding: 1rem 2rem;
                        font-size: 1.1rem;
                    }
                    .submit-button:disabled {
                        opacity: 0.6;
                        cursor: wait;
                    }
                    section {
                        padding: 4rem 2rem;
                        max-width: 64rem;
                        margin: 0 auto;
                    }
                    .service-grid {
                        display: grid;
                        grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
                        gap: 1.5rem;
                    }
                    .service-card {
                        padding: 2rem;
                        border-radius: 12px;
                        background: white;
                        box-shadow: 0 4px 6px -1px rgba(0, 0, 0, 0.1);
                        opacity: 0;
                        transform: translateY(30px);
                        transition: opacity 0.6s ease, transform 0.6s ease;
                    }
                    .service-card.visible {
                        opacity: 1;
                        transform: translateY(0);
                    }
                    .contact-form {
                        display: flex;
                        flex-direction: column;
                        gap: 1rem;
                        max-width: 32rem;
                    }
                    .contact-form input,
                    .contact-form select,
                    .contact-form textarea {
                        padding: 0.75rem;
                        border: 1px solid #cbd5e1;
                        border-radius: 8px;
                        font-size: 1rem;
                    }
                    .contact-form textarea {
                        min-height: 8rem;
                        resize: vertical;
                    }
                    .closing-cta {
                        text-align: center;
                        background: #f1f5f9;
                        border-radius: 12px;
                    }
                "#}
            </style>

            <nav class={nav_class}>
                <span class="nav-logo">{ "Post Trading" }</span>
                <div class="nav-links">
                    <a href="#services" onclick={anchor("services")}>{ config.navigation.services }</a>
                    <a href="#audience" onclick={anchor("audience")}>{ config.navigation.target_audience }</a>
                    <a href="#references" onclick={anchor("references")}>{ config.navigation.references }</a>
                    <a href="#contact" onclick={anchor("contact")}>{ config.navigation.contact }</a>
                    <a href={store.alternate_url()}>{ config.navigation.language_switch }</a>
                </div>
            </nav>

            <header class="hero">
                <h1>{ config.title }</h1>
                <p>{ config.description }</p>
                <button class="cta-button-large" onclick={anchor("contact")}>
                    { config.cta.consultation }
                </button>
            </header>

            <section id="services">
                <h2>{ config.navigation.services }</h2>
                <div class="service-grid">
                    <div class="service-card">{ services.accounting }</div>
                    <div class="service-card">{ services.reporting }</div>
                    <div class="service-card">{ services.tax }</div>
                    <div class="service-card">{ services.consulting }</div>
                </div>
            </section>

            <section id="audience">
                <h2>{ config.navigation.target_audience }</h2>
                <p>{ config.description }</p>
            </section>

            <section id="references">
                <h2>{ config.navigation.references }</h2>
                <section class="closing-cta">
                    <h3>{ config.cta.need_help }</h3>
                    <p>{ config.cta.more_details }</p>
                    <button class="cta-button" onclick={anchor("contact")}>
                        { config.cta.schedule_consultation }
                    </button>
                </section>
            </section>

            <section id="contact">
                <h2>{ config.navigation.contact }</h2>
                <form class="contact-form" onsubmit={onsubmit}>
                    <input
                        type="text"
                        name="name"
                        placeholder={config.form.name}
                        value={(*name).clone()}
                        oninput={let name = name.clone(); move |e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            name.set(input.value());
                        }}
                    />
                    <input
                        type="text"
                        name="email"
                        placeholder={config.form.email}
                        value={(*email).clone()}
                        oninput={let email = email.clone(); move |e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            email.set(input.value());
                        }}
                    />
                    <input
                        type="text"
                        name="company"
                        placeholder={config.form.company}
                        value={(*company).clone()}
                        oninput={let company = company.clone(); move |e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            company.set(input.value());
                        }}
                    />
                    <select
                        name="service"
                        onchange={let service = service.clone(); move |e: Event| {
                            let select: HtmlSelectElement = e.target_unchecked_into();
                            service.set(select.value());
                        }}
                    >
                        <option value="" selected={(*service).is_empty()}>{ config.form.service }</option>
                        <option value={services.accounting}>{ services.accounting }</option>
                        <option value={services.reporting}>{ services.reporting }</option>
                        <option value={services.tax}>{ services.tax }</option>
                        <option value={services.consulting}>{ services.consulting }</option>
                        <option value={services.other}>{ services.other }</option>
                    </select>
                    <textarea
                        name="message"
                        placeholder={config.form.message}
                        value={(*message).clone()}
                        oninput={let message = message.clone(); move |e: InputEvent| {
                            let area: HtmlTextAreaElement = e.target_unchecked_into();
                            message.set(area.value());
                        }}
                    />
                    <button class="submit-button" type="submit" disabled={submitting}>
                        { if submitting { config.form.submitting } else { config.form.submit } }
                    </button>
                </form>
            </section>

            {
                if let Some((nonce, kind, text)) = (*notification).clone() {
                    html! {
                        <Notification
                            nonce={nonce}
                            kind={kind}
                            message={text}
                            on_dismiss={dismiss_notification}
                        />
                    }
                } else {
                    html! {}
                }
            }

            <CookieBanner config={config} />
        </div>
    }
}
