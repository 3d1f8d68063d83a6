// SPDX-License-Identifier: MPL-2.0
use crate::app::config::Config;
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

/// Locale used when nothing else matches.
pub const DEFAULT_LOCALE: &str = "en-US";

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

pub struct I18n {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    pub available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None, &Config::default())
    }
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("available_locales", &self.available_locales)
            .field("current_locale", &self.current_locale)
            .finish()
    }
}

fn load_bundle(
    locale: &LanguageIdentifier,
    filename: &str,
) -> Option<FluentBundle<FluentResource>> {
    let content = Asset::get(filename)?;
    let source = String::from_utf8_lossy(content.data.as_ref()).to_string();
    let resource = match FluentResource::try_new(source) {
        Ok(resource) => resource,
        Err((_, errors)) => {
            eprintln!("[WARN] Skipping {filename}: {} syntax errors", errors.len());
            return None;
        }
    };

    let mut bundle = FluentBundle::new(vec![locale.clone()]);
    // Isolation marks render as boxes in iced text.
    bundle.set_use_isolating(false);
    if let Err(errors) = bundle.add_resource(resource) {
        eprintln!("[WARN] Duplicate messages in {filename}: {}", errors.len());
    }
    Some(bundle)
}

impl I18n {
    #[must_use]
    pub fn new(cli_lang: Option<String>, config: &Config) -> Self {
        let mut bundles = HashMap::new();
        let mut available_locales = Vec::new();

        for file in Asset::iter() {
            let filename = file.as_ref();
            let Some(locale) = filename
                .strip_suffix(".ftl")
                .and_then(|stem| stem.parse::<LanguageIdentifier>().ok())
            else {
                continue;
            };
            if let Some(bundle) = load_bundle(&locale, filename) {
                bundles.insert(locale.clone(), bundle);
                available_locales.push(locale);
            }
        }
        available_locales.sort_by_key(ToString::to_string);

        let default_locale: LanguageIdentifier = DEFAULT_LOCALE
            .parse()
            .unwrap_or_default();
        let current_locale =
            resolve_locale(cli_lang, config, &available_locales).unwrap_or(default_locale);

        Self {
            bundles,
            available_locales,
            current_locale,
        }
    }

    #[must_use]
    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    #[must_use]
    pub fn tr(&self, key: &str) -> String {
        self.format(key, None)
    }

    /// Translates `key` with named arguments.
    #[must_use]
    pub fn tr_with_args(&self, key: &str, args: &[(&str, FluentValue<'_>)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, value.clone());
        }
        self.format(key, Some(&fluent_args))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs<'_>>) -> String {
        if let Some(bundle) = self.bundles.get(&self.current_locale) {
            if let Some(pattern) = bundle.get_message(key).and_then(|msg| msg.value()) {
                let mut errors = vec![];
                let value = bundle.format_pattern(pattern, args, &mut errors);
                if errors.is_empty() {
                    return value.to_string();
                }
            }
        }
        format!("MISSING: {key}")
    }
}

fn resolve_locale(
    cli_lang: Option<String>,
    config: &Config,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    let candidates = [
        // 1. CLI args
        cli_lang,
        // 2. Config file
        config.general.language.clone(),
        // 3. OS locale
        sys_locale::get_locale(),
    ];

    candidates
        .into_iter()
        .flatten()
        .filter_map(|raw| raw.parse::<LanguageIdentifier>().ok())
        .find_map(|lang| match_available(&lang, available))
}

/// Exact match first, then the first available locale with the same language.
fn match_available(
    lang: &LanguageIdentifier,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    available
        .iter()
        .find(|candidate| *candidate == lang)
        .or_else(|| available.iter().find(|candidate| candidate.language == lang.language))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn available() -> Vec<LanguageIdentifier> {
        vec!["en-US".parse().unwrap(), "hi".parse().unwrap()]
    }

    #[test]
    fn cli_language_wins() {
        let mut config = Config::default();
        config.general.language = Some("en-US".to_string());
        let lang = resolve_locale(Some("hi".to_string()), &config, &available());
        assert_eq!(lang, Some("hi".parse().unwrap()));
    }

    #[test]
    fn config_language_is_used_without_cli() {
        let mut config = Config::default();
        config.general.language = Some("hi".to_string());
        let lang = resolve_locale(None, &config, &available());
        assert_eq!(lang, Some("hi".parse().unwrap()));
    }

    #[test]
    fn regional_variant_falls_back_to_language() {
        let lang = resolve_locale(Some("hi-IN".to_string()), &Config::default(), &available());
        assert_eq!(lang, Some("hi".parse().unwrap()));

        let lang = resolve_locale(Some("en-GB".to_string()), &Config::default(), &available());
        assert_eq!(lang, Some("en-US".parse().unwrap()));
    }

    #[test]
    fn unknown_language_is_skipped() {
        let mut config = Config::default();
        config.general.language = Some("hi".to_string());
        let lang = resolve_locale(Some("xx".to_string()), &config, &available());
        assert_eq!(lang, Some("hi".parse().unwrap()));
    }

    #[test]
    fn embedded_locales_are_loaded() {
        let i18n = I18n::new(Some("en-US".to_string()), &Config::default());
        assert!(i18n.available_locales.contains(&"en-US".parse().unwrap()));
        assert!(i18n.available_locales.contains(&"hi".parse().unwrap()));
        assert_eq!(i18n.tr("gallery-title"), "Gallery");
    }

    #[test]
    fn arguments_are_interpolated() {
        let i18n = I18n::new(Some("en-US".to_string()), &Config::default());
        let label = i18n.tr_with_args("gallery-total-images", &[("count", FluentValue::from(12_usize))]);
        assert_eq!(label, "Total Images: 12");
    }

    #[test]
    fn missing_key_is_flagged() {
        let i18n = I18n::new(Some("en-US".to_string()), &Config::default());
        assert_eq!(i18n.tr("no-such-key"), "MISSING: no-such-key");
    }
}
