use std::fmt;

use serde::{Deserialize, Serialize};

/// API version used when neither the caller nor the user config supplies one.
pub const DEFAULT_API_VERSION: &str = "45.0";

/// Answer key holding the output directory.
pub const OUTPUT_DIR_KEY: &str = "outputdir";
/// Answer key holding the API version.
pub const API_VERSION_KEY: &str = "apiversion";
/// Answer key holding the selected bundle name.
pub const TEMPLATE_KEY: &str = "template";
/// Canonical token every bundle may use for the type's name answer.
pub const NAME_TOKEN: &str = "name";

/// The kinds of skeleton that can be generated.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateType {
    AnalyticsTemplate,
    ApexClass,
    ApexTrigger,
    LightningApp,
    LightningComponent,
    LightningEvent,
    LightningInterface,
    LightningTest,
    Project,
    VisualforceComponent,
    VisualforcePage,
}

/// Declarative constraints attached to a [`TemplateType`].
#[derive(Debug, Clone, Copy)]
pub struct TemplateRule {
    /// Subdirectory of the template store holding this type's bundles.
    pub store_dir: &'static str,
    /// Answer key carrying the user-supplied name (validated as an identifier).
    pub name_key: &'static str,
    /// Free-text answers that must be present and non-empty.
    pub required_text: &'static [&'static str],
    /// Glob a bundle file name must match for the bundle to be offered.
    pub filter: &'static str,
    pub default_template: &'static str,
    /// Output paths must contain this directory segment.
    pub required_ancestor: Option<&'static str>,
    /// Type-specific defaults for optional answers.
    pub defaults: &'static [(&'static str, &'static str)],
}

impl TemplateType {
    pub const ALL: [TemplateType; 11] = [
        TemplateType::AnalyticsTemplate,
        TemplateType::ApexClass,
        TemplateType::ApexTrigger,
        TemplateType::LightningApp,
        TemplateType::LightningComponent,
        TemplateType::LightningEvent,
        TemplateType::LightningInterface,
        TemplateType::LightningTest,
        TemplateType::Project,
        TemplateType::VisualforceComponent,
        TemplateType::VisualforcePage,
    ];

    pub fn rule(self) -> TemplateRule {
        match self {
            TemplateType::AnalyticsTemplate => TemplateRule {
                store_dir: "analyticstemplate",
                name_key: "templatename",
                required_text: &[],
                filter: "template-info.json",
                default_template: "DefaultAnalyticsTemplate",
                required_ancestor: Some("waveTemplates"),
                defaults: &[],
            },
            TemplateType::ApexClass => TemplateRule {
                store_dir: "apexclass",
                name_key: "classname",
                required_text: &[],
                filter: "*.cls",
                default_template: "DefaultApexClass",
                required_ancestor: None,
                defaults: &[],
            },
            TemplateType::ApexTrigger => TemplateRule {
                store_dir: "apextrigger",
                name_key: "triggername",
                required_text: &[],
                filter: "*.trigger",
                default_template: "ApexTrigger",
                required_ancestor: None,
                defaults: &[("sobjecttype", "SOBJECT"), ("triggerevents", "before insert")],
            },
            TemplateType::LightningApp => TemplateRule {
                store_dir: "lightningapp",
                name_key: "appname",
                required_text: &[],
                filter: "*.app",
                default_template: "DefaultLightningApp",
                required_ancestor: Some("aura"),
                defaults: &[],
            },
            TemplateType::LightningComponent => TemplateRule {
                store_dir: "lightningcomponent",
                name_key: "componentname",
                required_text: &[],
                filter: "*.cmp",
                default_template: "DefaultLightningCmp",
                required_ancestor: Some("aura"),
                defaults: &[],
            },
            TemplateType::LightningEvent => TemplateRule {
                store_dir: "lightningevent",
                name_key: "eventname",
                required_text: &[],
                filter: "*.evt",
                default_template: "DefaultLightningEvt",
                required_ancestor: Some("aura"),
                defaults: &[],
            },
            TemplateType::LightningInterface => TemplateRule {
                store_dir: "lightninginterface",
                name_key: "interfacename",
                required_text: &[],
                filter: "*.intf",
                default_template: "DefaultLightningIntf",
                required_ancestor: Some("aura"),
                defaults: &[],
            },
            TemplateType::LightningTest => TemplateRule {
                store_dir: "lightningtest",
                name_key: "testname",
                required_text: &[],
                filter: "*.resource",
                default_template: "DefaultLightningTest",
                required_ancestor: None,
                defaults: &[],
            },
            TemplateType::Project => TemplateRule {
                store_dir: "project",
                name_key: "projectname",
                required_text: &[],
                filter: "sfdx-project.json",
                default_template: "standard",
                required_ancestor: None,
                defaults: &[],
            },
            TemplateType::VisualforceComponent => TemplateRule {
                store_dir: "visualforcecomponent",
                name_key: "componentname",
                required_text: &["label"],
                filter: "*.component",
                default_template: "DefaultVFComponent",
                required_ancestor: None,
                defaults: &[],
            },
            TemplateType::VisualforcePage => TemplateRule {
                store_dir: "visualforcepage",
                name_key: "pagename",
                required_text: &["label"],
                filter: "*.page",
                default_template: "DefaultVFPage",
                required_ancestor: None,
                defaults: &[],
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateType::AnalyticsTemplate => "analytics-template",
            TemplateType::ApexClass => "apex-class",
            TemplateType::ApexTrigger => "apex-trigger",
            TemplateType::LightningApp => "lightning-app",
            TemplateType::LightningComponent => "lightning-component",
            TemplateType::LightningEvent => "lightning-event",
            TemplateType::LightningInterface => "lightning-interface",
            TemplateType::LightningTest => "lightning-test",
            TemplateType::Project => "project",
            TemplateType::VisualforceComponent => "visualforce-component",
            TemplateType::VisualforcePage => "visualforce-page",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use clap::ValueEnum;

    use super::*;

    #[test]
    fn store_dirs_are_unique() {
        let dirs: HashSet<_> = TemplateType::ALL.iter().map(|t| t.rule().store_dir).collect();
        assert_eq!(dirs.len(), TemplateType::ALL.len());
    }

    #[test]
    fn display_matches_cli_value_names() {
        for kind in TemplateType::ALL {
            let value = kind.to_possible_value().unwrap();
            assert_eq!(value.get_name(), kind.to_string());
        }
    }

    #[test]
    fn lightning_bundles_require_aura_parent() {
        for kind in [
            TemplateType::LightningApp,
            TemplateType::LightningComponent,
            TemplateType::LightningEvent,
            TemplateType::LightningInterface,
        ] {
            assert_eq!(kind.rule().required_ancestor, Some("aura"), "{kind}");
        }
        assert_eq!(TemplateType::ApexClass.rule().required_ancestor, None);
    }
}
