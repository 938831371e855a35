use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single name/value connection parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

impl Parameter {
    /// Creates a new `Parameter` from a name and a value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A named remote-desktop connection definition: a protocol plus an ordered
/// parameter list.
///
/// Parameter order is preserved as read from the definition file; some
/// protocols are order-sensitive in how connection strings are assembled
/// downstream. Parameter names are typically unique but are not required to
/// be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionProfile {
    pub protocol: String,
    pub parameters: Vec<Parameter>,
}

impl ConnectionProfile {
    /// Creates an empty profile for the given protocol.
    pub fn new(protocol: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            parameters: Vec::new(),
        }
    }

    /// Sets a parameter value, overwriting the first existing parameter with
    /// the same name and appending otherwise.
    pub fn set_parameter(&mut self, name: &str, value: &str) {
        match self.parameters.iter_mut().find(|p| p.name == name) {
            Some(param) => param.value = value.to_string(),
            None => self.parameters.push(Parameter::new(name, value)),
        }
    }

    /// Returns the value of the first parameter with the given name.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }
}

/// All known connection profiles, indexed by identifier.
pub type ProfileMap = HashMap<String, ConnectionProfile>;
