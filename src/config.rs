//! Language detection and the per-locale configuration table.
//!
//! The site is served in two variants (Czech on uctujtrading.cz, English on
//! post-trading.com). The locale is resolved once at startup and every
//! user-facing string comes out of the static table below.

use serde::Serialize;

pub const CZECH_SITE_URL: &str = "https://uctujtrading.cz";
pub const ENGLISH_SITE_URL: &str = "https://post-trading.com";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Locale {
    Cs,
    En,
}

/// Environment signals the resolver looks at, in priority order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocaleSignals {
    /// Current document path, e.g. `/en/index.html`.
    pub path: String,
    /// `lang` attribute of the document root element.
    pub document_lang: Option<String>,
    /// The browser's preferred language, e.g. `en-US`.
    pub preferred_language: Option<String>,
}

impl LocaleSignals {
    pub fn from_window() -> Self {
        let window = web_sys::window();
        let path = window
            .as_ref()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default();
        let document_lang = window
            .as_ref()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
            .and_then(|e| e.get_attribute("lang"));
        let preferred_language = window.as_ref().and_then(|w| w.navigator().language());
        Self {
            path,
            document_lang,
            preferred_language,
        }
    }
}

impl Locale {
    /// Resolves the active locale. Signals are checked in order and the
    /// first English match wins; Czech is the default and needs no signal.
    pub fn resolve(signals: &LocaleSignals) -> Locale {
        // Both `/en/index.html` and the router's bare `/en` are English.
        if signals.path.contains("/en/") || signals.path.ends_with("/en") {
            return Locale::En;
        }
        if signals.document_lang.as_deref() == Some("en") {
            return Locale::En;
        }
        if signals
            .preferred_language
            .as_deref()
            .map_or(false, |lang| lang.starts_with("en"))
        {
            return Locale::En;
        }
        Locale::Cs
    }
}

#[derive(Debug, PartialEq, Serialize)]
pub struct CookieConsentText {
    pub title: &'static str,
    pub description: &'static str,
    pub necessary: &'static str,
    pub analytics: &'static str,
    pub accept_all: &'static str,
    pub accept_selected: &'static str,
    pub reject: &'static str,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct NavigationText {
    pub services: &'static str,
    pub target_audience: &'static str,
    pub references: &'static str,
    pub contact: &'static str,
    pub language_switch: &'static str,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct ValidationText {
    pub required: &'static str,
    pub email: &'static str,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct FormText {
    pub name: &'static str,
    pub email: &'static str,
    pub company: &'static str,
    pub service: &'static str,
    pub message: &'static str,
    pub submit: &'static str,
    pub submitting: &'static str,
    pub success: &'static str,
    pub error: &'static str,
    pub not_provided: &'static str,
    pub validation: ValidationText,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct ServiceText {
    pub accounting: &'static str,
    pub reporting: &'static str,
    pub tax: &'static str,
    pub consulting: &'static str,
    pub other: &'static str,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct CtaText {
    pub consultation: &'static str,
    pub schedule_consultation: &'static str,
    pub need_help: &'static str,
    pub more_details: &'static str,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct LocaleConfig {
    pub lang: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub ga_tracking_id: &'static str,
    pub cookie_consent: CookieConsentText,
    pub navigation: NavigationText,
    pub form: FormText,
    pub services: ServiceText,
    pub cta: CtaText,
}

static CS: LocaleConfig = LocaleConfig {
    lang: "cs",
    title: "Účtování aktivního tradingu - Profesionální účetní služby pro kapitálové trhy",
    description: "Specializované účetní služby pro aktivní trading na kapitálových trzích. Účtování transakcí, reporting a konzultace pro investory a obchodníky s cennými papíry.",
    ga_tracking_id: "G-LLNL3TVW1L",
    cookie_consent: CookieConsentText {
        title: "🍪 Soubory cookies",
        description: "Používáme soubory cookies k analýze návštěvnosti webu a zlepšení uživatelské zkušenosti. Můžete si vybrat, které cookies chcete povolit.",
        necessary: "Nezbytné cookies (vždy aktivní)",
        analytics: "Analytické cookies (Google Analytics)",
        accept_all: "Přijmout vše",
        accept_selected: "Přijmout vybrané",
        reject: "Odmítnout",
    },
    navigation: NavigationText {
        services: "Služby",
        target_audience: "Cílová skupina",
        references: "Reference",
        contact: "Kontakt",
        language_switch: "EN",
    },
    form: FormText {
        name: "Vaše jméno",
        email: "Váš email",
        company: "Název společnosti",
        service: "Vyberte službu",
        message: "Vaše zpráva",
        submit: "Odeslat zprávu",
        submitting: "Odesílám...",
        success: "Děkujeme za vaši zprávu! Budeme vás kontaktovat co nejdříve.",
        error: "Omlouváme se, při odesílání zprávy došlo k chybě. Zkuste to prosím znovu.",
        not_provided: "Neuvedeno",
        validation: ValidationText {
            required: "Prosím vyplňte všechna povinná pole.",
            email: "Prosím zadejte platný email.",
        },
    },
    services: ServiceText {
        accounting: "Účtování transakcí",
        reporting: "Reporting a výkaznictví",
        tax: "Daňové služby",
        consulting: "Konzultace",
        other: "Jiné",
    },
    cta: CtaText {
        consultation: "Konzultace zdarma",
        schedule_consultation: "Domluvit konzultaci",
        need_help: "Potřebujete pomoc s účtováním tradingu?",
        more_details: "Více detailů mohu poskytnout na osobním setkání. Rád se s Vámi sejdu a proberu možnosti spolupráce.",
    },
};

static EN: LocaleConfig = LocaleConfig {
    lang: "en",
    title: "Active Trading Accounting - Professional Accounting Services for Capital Markets",
    description: "Specialized accounting services for active trading on capital markets. Transaction accounting, reporting and consulting for investors and securities traders.",
    ga_tracking_id: "G-S53VQ14VEK",
    cookie_consent: CookieConsentText {
        title: "🍪 Cookies",
        description: "We use cookies to analyze website traffic and improve user experience. You can choose which cookies to allow.",
        necessary: "Necessary cookies (always active)",
        analytics: "Analytics cookies (Google Analytics)",
        accept_all: "Accept All",
        accept_selected: "Accept Selected",
        reject: "Reject",
    },
    navigation: NavigationText {
        services: "Services",
        target_audience: "Target Audience",
        references: "References",
        contact: "Contact",
        language_switch: "CS",
    },
    form: FormText {
        name: "Your name",
        email: "Your email",
        company: "Company name",
        service: "Select service",
        message: "Your message",
        submit: "Send Message",
        submitting: "Sending...",
        success: "Thank you for your message! We will contact you as soon as possible.",
        error: "Sorry, there was an error sending the message. Please try again.",
        not_provided: "Not provided",
        validation: ValidationText {
            required: "Please fill in all required fields.",
            email: "Please enter a valid email.",
        },
    },
    services: ServiceText {
        accounting: "Transaction Accounting",
        reporting: "Reporting and Statements",
        tax: "Tax Services",
        consulting: "Consulting",
        other: "Other",
    },
    cta: CtaText {
        consultation: "Free Consultation",
        schedule_consultation: "Schedule Consultation",
        need_help: "Need help with trading accounting?",
        more_details: "I can provide more details at a personal meeting. I would be happy to meet with you and discuss cooperation possibilities.",
    },
};

/// Total lookup; every `Locale` has an entry by construction.
pub fn config_for(locale: Locale) -> &'static LocaleConfig {
    match locale {
        Locale::Cs => &CS,
        Locale::En => &EN,
    }
}

/// The resolved locale plus accessors over its configuration. Resolved once
/// in `main` and handed down as props, never read from globals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigStore {
    locale: Locale,
}

impl ConfigStore {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn resolve() -> Self {
        Self::new(Locale::resolve(&LocaleSignals::from_window()))
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn current(&self) -> &'static LocaleConfig {
        config_for(self.locale)
    }

    pub fn is_czech(&self) -> bool {
        self.locale == Locale::Cs
    }

    pub fn is_english(&self) -> bool {
        self.locale == Locale::En
    }

    /// URL of this page's sibling in the other language, for the nav switch.
    pub fn alternate_url(&self) -> &'static str {
        match self.locale {
            Locale::Cs => ENGLISH_SITE_URL,
            Locale::En => CZECH_SITE_URL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(path: &str, doc: Option<&str>, preferred: Option<&str>) -> LocaleSignals {
        LocaleSignals {
            path: path.to_string(),
            document_lang: doc.map(str::to_string),
            preferred_language: preferred.map(str::to_string),
        }
    }

    #[test]
    fn path_segment_selects_english() {
        let s = signals("/en/index.html", None, None);
        assert_eq!(Locale::resolve(&s), Locale::En);
    }

    #[test]
    fn document_lang_selects_english() {
        let s = signals("/index.html", Some("en"), None);
        assert_eq!(Locale::resolve(&s), Locale::En);
    }

    #[test]
    fn preferred_language_prefix_selects_english() {
        let s = signals("/", None, Some("en-US"));
        assert_eq!(Locale::resolve(&s), Locale::En);
    }

    #[test]
    fn defaults_to_czech_without_english_signal() {
        let s = signals("/", Some("cs"), Some("cs-CZ"));
        assert_eq!(Locale::resolve(&s), Locale::Cs);
        assert_eq!(Locale::resolve(&LocaleSignals::default()), Locale::Cs);
    }

    #[test]
    fn path_wins_over_conflicting_signals() {
        let s = signals("/en/", Some("cs"), Some("cs-CZ"));
        assert_eq!(Locale::resolve(&s), Locale::En);
    }

    #[test]
    fn bare_en_route_is_an_english_signal() {
        // The router serves the English page at `/en` without a trailing
        // slash; a Czech browser on that route must still get English.
        let s = signals("/en", Some("cs"), Some("cs-CZ"));
        assert_eq!(Locale::resolve(&s), Locale::En);
        // `/en` only counts as a whole path segment.
        assert_eq!(Locale::resolve(&signals("/agenda", None, None)), Locale::Cs);
        assert_eq!(Locale::resolve(&signals("/garden", None, None)), Locale::Cs);
    }

    #[test]
    fn document_lang_wins_over_preference() {
        let s = signals("/", Some("en"), Some("cs-CZ"));
        assert_eq!(Locale::resolve(&s), Locale::En);
        // A non-English attribute does not block the preference check.
        let s = signals("/", Some("cs"), Some("en-GB"));
        assert_eq!(Locale::resolve(&s), Locale::En);
    }

    fn key_shape(value: &serde_json::Value) -> serde_json::Value {
        match value {
            serde_json::Value::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), key_shape(v)))
                    .collect(),
            ),
            _ => serde_json::Value::Null,
        }
    }

    #[test]
    fn both_locales_share_the_same_key_structure() {
        let cs = serde_json::to_value(config_for(Locale::Cs)).unwrap();
        let en = serde_json::to_value(config_for(Locale::En)).unwrap();
        assert_eq!(key_shape(&cs), key_shape(&en));
    }

    #[test]
    fn lookup_is_total_and_distinct() {
        assert_eq!(config_for(Locale::Cs).lang, "cs");
        assert_eq!(config_for(Locale::En).lang, "en");
        assert_ne!(
            config_for(Locale::Cs).ga_tracking_id,
            config_for(Locale::En).ga_tracking_id
        );
    }

    #[test]
    fn store_predicates_and_alternate_url() {
        let cs = ConfigStore::new(Locale::Cs);
        assert!(cs.is_czech() && !cs.is_english());
        assert_eq!(cs.alternate_url(), ENGLISH_SITE_URL);

        let en = ConfigStore::new(Locale::En);
        assert!(en.is_english() && !en.is_czech());
        assert_eq!(en.alternate_url(), CZECH_SITE_URL);
        assert_eq!(en.current().form.not_provided, "Not provided");
    }
}
