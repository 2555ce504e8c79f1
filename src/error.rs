#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::config::rules::TemplateType;
use crate::path::LocationIssue;
use crate::validate::IdentifierViolation;

#[derive(Debug, Error, Diagnostic)]
pub enum ScaffoldError {
    #[error("Invalid {field} '{value}': {violation}")]
    #[diagnostic(help(
        "Names must start with a letter, use only letters, digits and single underscores, and not be a reserved word"
    ))]
    InvalidIdentifier {
        field: String,
        value: String,
        violation: IdentifierViolation,
    },

    #[error("Missing required option '{key}' for {kind}")]
    MissingRequiredAnswer { kind: TemplateType, key: String },

    #[error("Invalid API version '{value}'")]
    #[diagnostic(help("API versions look like 45.0"))]
    InvalidApiVersion { value: String },

    #[error("Template '{name}' not found for {kind} (available: {})", available.join(", "))]
    #[diagnostic(help("Run `scaffold list` to see the templates for each type"))]
    TemplateNotFound {
        kind: TemplateType,
        name: String,
        available: Vec<String>,
    },

    #[error("Invalid output directory {path}: {issue}")]
    InvalidOutputLocation { path: PathBuf, issue: LocationIssue },

    #[error("No answer for '{token}' referenced by {file}")]
    #[diagnostic(help("Pass the missing value with --set KEY=VALUE"))]
    MissingAnswer { token: String, file: String },

    #[error("File already exists: {path}")]
    #[diagnostic(help("Use --force to overwrite existing files"))]
    FileCollision {
        path: PathBuf,
        /// Files written by this run before the collision; they are left in place.
        written: Vec<PathBuf>,
    },

    #[error("Template rendering failed for {file}")]
    #[diagnostic(help("Check the Tera syntax in the template bundle"))]
    RenderError {
        file: String,
        #[source]
        source: tera::Error,
    },

    #[error("Failed to render filename: {filename}")]
    FilenameRenderError {
        filename: String,
        #[source]
        source: tera::Error,
    },

    #[error("Failed to parse config file {path}")]
    #[diagnostic(help("Check the TOML syntax in your config file"))]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Glob pattern error: {pattern}")]
    GlobPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
