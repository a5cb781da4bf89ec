use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};

use super::RequestError;

/// HTTP method declared by a swagger operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete
}

impl Method {
    #[inline]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get    => "get",
            Self::Post   => "post",
            Self::Put    => "put",
            Self::Delete => "delete"
        }
    }
}

impl TryFrom<&str> for Method {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "get"    => Ok(Self::Get),
            "post"   => Ok(Self::Post),
            "put"    => Ok(Self::Put),
            "delete" => Ok(Self::Delete),

            _ => Err(())
        }
    }
}

/// Single operation declared by the definition document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub id: String,
    pub method: Method,

    /// Path template with `{name}` placeholders
    pub path: String,

    /// Names of the parameters the operation declares
    pub parameters: Vec<String>
}

impl Operation {
    /// Substitute path placeholders from the descriptor and
    /// collect whatever remains into the query string
    ///
    /// Fails if a placeholder is left unresolved
    pub fn resolve(&self, request: &RequestDescriptor) -> Result<(String, Vec<(String, String)>), RequestError> {
        let mut path = self.path.clone();
        let mut query = Vec::new();

        for (name, value) in request.parameters() {
            let placeholder = format!("{{{name}}}");

            if path.contains(&placeholder) {
                path = path.replace(&placeholder, value);
            }

            else {
                query.push((name.clone(), value.clone()));
            }
        }

        if let (Some(start), Some(end)) = (path.find('{'), path.find('}')) {
            if start < end {
                return Err(RequestError::MissingPathParameter {
                    operation: self.id.clone(),
                    name: path[start + 1..end].to_string()
                });
            }
        }

        Ok((path, query))
    }
}

/// One request: an ordered mapping of parameter name to value
///
/// Built once, consumed once. The descriptor carries exactly the
/// supplied parameters; nothing is added or rewritten on the way
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestDescriptor {
    parameters: BTreeMap<String, String>
}

impl RequestDescriptor {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.parameters.insert(name.into(), value.to_string());

        self
    }

    #[inline]
    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }
}
