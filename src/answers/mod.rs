use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex_lite::Regex;

use crate::config::rules::{
    TemplateType, API_VERSION_KEY, DEFAULT_API_VERSION, NAME_TOKEN, TEMPLATE_KEY,
};
use crate::error::{Result, ScaffoldError};
use crate::validate::validate;

/// Option name to value, as supplied by the caller.
pub type AnswersMap = BTreeMap<String, String>;

fn api_version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[1-9][0-9]*\.0$").expect("static pattern is valid"))
}

/// Check and complete the caller's answers for `kind`.
///
/// Every required key is checked before anything else happens, and the returned map
/// carries type defaults, the selected template, the API version and the name answer
/// duplicated under the canonical `name` token. `outputdir` is passed through untouched;
/// the path resolver owns it.
pub fn prepare_answers(
    kind: TemplateType,
    raw: &AnswersMap,
    default_api_version: Option<&str>,
) -> Result<AnswersMap> {
    let rule = kind.rule();

    let name = raw
        .get(rule.name_key)
        .or_else(|| raw.get(NAME_TOKEN))
        .ok_or_else(|| ScaffoldError::MissingRequiredAnswer {
            kind,
            key: rule.name_key.to_string(),
        })?;
    validate(rule.name_key, name)?;

    let template = raw
        .get(TEMPLATE_KEY)
        .map(String::as_str)
        .unwrap_or(rule.default_template);
    validate(TEMPLATE_KEY, template)?;

    for key in rule.required_text {
        let present = raw.get(*key).is_some_and(|v| !v.trim().is_empty());
        if !present {
            return Err(ScaffoldError::MissingRequiredAnswer {
                kind,
                key: key.to_string(),
            });
        }
    }

    let api_version = raw
        .get(API_VERSION_KEY)
        .map(String::as_str)
        .or(default_api_version)
        .unwrap_or(DEFAULT_API_VERSION);
    if !api_version_pattern().is_match(api_version) {
        return Err(ScaffoldError::InvalidApiVersion {
            value: api_version.to_string(),
        });
    }

    let mut answers: AnswersMap = rule
        .defaults
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    answers.extend(raw.iter().map(|(k, v)| (k.clone(), v.clone())));

    let name = name.clone();
    answers.insert(rule.name_key.to_string(), name.clone());
    answers.insert(NAME_TOKEN.to_string(), name);
    answers.insert(TEMPLATE_KEY.to_string(), template.to_string());
    answers.insert(API_VERSION_KEY.to_string(), api_version.to_string());

    Ok(answers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::IdentifierViolation;

    fn answers(pairs: &[(&str, &str)]) -> AnswersMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn fills_defaults_and_name_alias() {
        let raw = answers(&[("appname", "myapp")]);
        let prepared = prepare_answers(TemplateType::LightningApp, &raw, None).unwrap();

        assert_eq!(prepared["appname"], "myapp");
        assert_eq!(prepared["name"], "myapp");
        assert_eq!(prepared["template"], "DefaultLightningApp");
        assert_eq!(prepared["apiversion"], DEFAULT_API_VERSION);
    }

    #[test]
    fn canonical_name_is_accepted_as_input() {
        let raw = answers(&[("name", "Foo")]);
        let prepared = prepare_answers(TemplateType::ApexClass, &raw, None).unwrap();
        assert_eq!(prepared["classname"], "Foo");
    }

    #[test]
    fn type_defaults_yield_to_caller_values() {
        let raw = answers(&[("triggername", "AccountTrigger"), ("sobjecttype", "Account")]);
        let prepared = prepare_answers(TemplateType::ApexTrigger, &raw, None).unwrap();
        assert_eq!(prepared["sobjecttype"], "Account");
        assert_eq!(prepared["triggerevents"], "before insert");
    }

    #[test]
    fn configured_api_version_is_used_when_not_supplied() {
        let raw = answers(&[("classname", "Foo")]);
        let prepared = prepare_answers(TemplateType::ApexClass, &raw, Some("52.0")).unwrap();
        assert_eq!(prepared["apiversion"], "52.0");

        let raw = answers(&[("classname", "Foo"), ("apiversion", "48.0")]);
        let prepared = prepare_answers(TemplateType::ApexClass, &raw, Some("52.0")).unwrap();
        assert_eq!(prepared["apiversion"], "48.0");
    }

    #[test]
    fn missing_name_is_reported_with_type_key() {
        let err = prepare_answers(TemplateType::LightningApp, &AnswersMap::new(), None).unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::MissingRequiredAnswer { ref key, .. } if key == "appname"
        ));
    }

    #[test]
    fn invalid_template_name_is_rejected() {
        let raw = answers(&[("appname", "myapp"), ("template", "../other")]);
        let err = prepare_answers(TemplateType::LightningApp, &raw, None).unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::InvalidIdentifier { ref field, violation: IdentifierViolation::MustStartWithLetter, .. }
                if field == "template"
        ));
    }

    #[test]
    fn visualforce_requires_label() {
        let raw = answers(&[("pagename", "Home"), ("label", "  ")]);
        let err = prepare_answers(TemplateType::VisualforcePage, &raw, None).unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::MissingRequiredAnswer { ref key, .. } if key == "label"
        ));
    }

    #[test]
    fn malformed_api_version_is_rejected() {
        let raw = answers(&[("classname", "Foo"), ("apiversion", "45")]);
        let err = prepare_answers(TemplateType::ApexClass, &raw, None).unwrap_err();
        assert!(matches!(err, ScaffoldError::InvalidApiVersion { .. }));
    }
}
