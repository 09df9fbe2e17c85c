use crate::domain::model::{ComponentName, ComponentSpec, ExtraPorts, PortGroups};
use crate::utils::error::{Result, ScaffoldError};
use crate::utils::validation::{
    validate_crate_name, validate_disjoint, validate_identifier, validate_non_empty_string,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// The on-disk component specification (`component.toml`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentConfig {
    pub component_name: String,
    pub component_description: String,
    pub ports: PortGroups,
    #[serde(default, alias = "extra ports")]
    pub extra_ports: ExtraPortsConfig,
    #[serde(default, alias = "cargo dependencies")]
    pub cargo_dependencies: BTreeMap<String, String>,
    #[serde(default, alias = "external dependencies")]
    pub external_dependencies: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtraPortsConfig {
    #[serde(default)]
    pub option: String,
    #[serde(default)]
    pub acc: String,
    #[serde(default)]
    pub portal: PortalFlag,
}

/// `portal = "true"` (only that exact string enables it) or `portal = true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortalFlag {
    Bool(bool),
    Text(String),
}

impl Default for PortalFlag {
    fn default() -> Self {
        PortalFlag::Bool(false)
    }
}

impl PortalFlag {
    pub fn enabled(&self) -> bool {
        match self {
            PortalFlag::Bool(enabled) => *enabled,
            PortalFlag::Text(text) => text == "true",
        }
    }
}

impl ComponentConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScaffoldError::spec(path.display().to_string(), format!("cannot read file: {}", e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| ScaffoldError::spec("toml_parsing", format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${COMPONENT_AUTHOR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScaffoldError::TemplateError {
            message: format!("environment substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        ComponentName::parse(&self.component_name)?;
        validate_non_empty_string("component_description", &self.component_description)?;

        for (kind, group) in self.ports.iter() {
            let field = format!("ports.{}", kind.label());
            for (port, contract) in group {
                validate_identifier(&field, port)?;
                validate_identifier(&format!("{}.{}", field, port), contract)?;
            }
        }
        validate_disjoint("ports", self.ports.iter().map(|(_, group)| group.keys()))?;

        for (name, version) in &self.cargo_dependencies {
            validate_crate_name("cargo_dependencies", name)?;
            validate_non_empty_string(&format!("cargo_dependencies.{}", name), version)?;
        }

        for (group, identifiers) in &self.external_dependencies {
            for identifier in identifiers {
                validate_non_empty_string(&format!("external_dependencies.{}", group), identifier)?;
            }
        }

        Ok(())
    }

    /// Validates and converts into the generator's input.
    pub fn into_spec(self) -> Result<ComponentSpec> {
        self.validate_config()?;

        Ok(ComponentSpec {
            name: ComponentName::parse(&self.component_name)?,
            description: self.component_description,
            ports: self.ports,
            cargo_deps: self.cargo_dependencies,
            external_deps: self.external_dependencies,
            extra_ports: ExtraPorts {
                option: self.extra_ports.option,
                acc: self.extra_ports.acc,
                portal: self.extra_ports.portal.enabled(),
            },
        })
    }
}

impl Validate for ComponentConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
