//! Built-in resolver that simulates resources without touching anything real
//!
//! ## Behaviour
//!
//! - Parameters: `Parameters.<name>.Default` overlaid by supplied values
//! - Resources: each entry needs a `Type` of the form `A::B::C`
//! - Update: same id + same type keeps the physical id, a changed type
//!   replaces it, new ids are created, vanished ids are dropped
//! - Delete: every resource is marked [`ResourceState::Deleted`]
//! - Outputs: string literals, `{"Ref": name}`, or JSON text of anything else

use crate::error::ResolveError;
use crate::parser::TemplateTree;
use crate::resolver::{
    Output, OutputMap, ResolveContext, ResolvedResource, ResourceMap, ResourceResolver,
    ResourceState,
};
use rand::Rng;
use rustc_hash::FxHashSet;
use serde_json::{Map, Value};
use stratus_core::Parameters;
use tracing::debug;

const PHYSICAL_ID_SUFFIX_LEN: usize = 12;
const PHYSICAL_ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// In-memory resolver that allocates fake physical ids
#[derive(Debug, Clone, Default)]
pub struct SimulatedResolver {
    /// When set, only these resource types are accepted
    supported_types: Option<FxHashSet<String>>,
}

impl SimulatedResolver {
    /// Accept any well-formed resource type
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept only the listed resource types
    pub fn with_supported_types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            supported_types: Some(types.into_iter().map(Into::into).collect()),
        }
    }

    fn resolve_parameters(
        &self,
        supplied: &Parameters,
        tree: &TemplateTree,
    ) -> Result<Parameters, ResolveError> {
        let mut resolved = Parameters::new();
        if let Some(declared) = section_map(tree.parameters(), "Parameters")? {
            for (name, decl) in declared {
                let value = match supplied.get(name) {
                    Some(v) => v.clone(),
                    None => match decl.get("Default") {
                        Some(default) => scalar_to_string(default),
                        None => {
                            return Err(ResolveError::MissingParameter { name: name.clone() })
                        }
                    },
                };
                resolved.insert(name.clone(), value);
            }
        }
        // Undeclared values are passed through so callers can see what they sent.
        for (name, value) in supplied {
            resolved.entry(name.clone()).or_insert_with(|| value.clone());
        }
        Ok(resolved)
    }

    fn declared_resources<'t>(
        &self,
        tree: &'t TemplateTree,
    ) -> Result<Vec<(&'t String, String, Value)>, ResolveError> {
        let Some(resources) = section_map(tree.resources(), "Resources")? else {
            return Ok(Vec::new());
        };
        let mut declared = Vec::with_capacity(resources.len());
        for (logical_id, decl) in resources {
            let Some(decl) = decl.as_object() else {
                return Err(invalid(logical_id, "declaration must be a mapping"));
            };
            let Some(resource_type) = decl.get("Type").and_then(Value::as_str) else {
                return Err(invalid(logical_id, "missing 'Type'"));
            };
            self.check_type(logical_id, resource_type)?;
            let properties = decl.get("Properties").cloned().unwrap_or(Value::Null);
            declared.push((logical_id, resource_type.to_string(), properties));
        }
        Ok(declared)
    }

    fn check_type(&self, logical_id: &str, resource_type: &str) -> Result<(), ResolveError> {
        let segments: Vec<&str> = resource_type.split("::").collect();
        if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
            return Err(invalid(
                logical_id,
                &format!("malformed type '{}'", resource_type),
            ));
        }
        if let Some(supported) = &self.supported_types {
            if !supported.contains(resource_type) {
                return Err(invalid(
                    logical_id,
                    &format!("unsupported type '{}'", resource_type),
                ));
            }
        }
        Ok(())
    }
}

impl ResourceResolver for SimulatedResolver {
    fn create_resources(
        &self,
        ctx: &ResolveContext<'_>,
        tree: &TemplateTree,
    ) -> Result<ResourceMap, ResolveError> {
        let parameters = self.resolve_parameters(ctx.parameters, tree)?;
        let declared = self.declared_resources(tree)?;

        let mut map = ResourceMap::new(parameters);
        for (logical_id, resource_type, properties) in declared {
            debug!(
                stack = ctx.stack_name,
                logical_id = %logical_id,
                resource_type = %resource_type,
                "creating resource"
            );
            map.insert(ResolvedResource {
                logical_id: logical_id.clone(),
                physical_id: physical_id(ctx.stack_name, logical_id),
                resource_type,
                properties,
                state: ResourceState::Created,
            });
        }
        Ok(map)
    }

    fn update_resources(
        &self,
        ctx: &ResolveContext<'_>,
        current: &ResourceMap,
        _previous: &TemplateTree,
        next: &TemplateTree,
    ) -> Result<ResourceMap, ResolveError> {
        let parameters = self.resolve_parameters(ctx.parameters, next)?;
        let declared = self.declared_resources(next)?;

        let mut map = ResourceMap::new(parameters);
        for (logical_id, resource_type, properties) in declared {
            let resource = match current.get(logical_id) {
                Some(existing) if existing.resource_type == resource_type => ResolvedResource {
                    physical_id: existing.physical_id.clone(),
                    state: ResourceState::Updated,
                    logical_id: logical_id.clone(),
                    resource_type,
                    properties,
                },
                existing => {
                    debug!(
                        stack = ctx.stack_name,
                        logical_id = %logical_id,
                        replaced = existing.is_some(),
                        "allocating resource"
                    );
                    ResolvedResource {
                        physical_id: physical_id(ctx.stack_name, logical_id),
                        state: ResourceState::Created,
                        logical_id: logical_id.clone(),
                        resource_type,
                        properties,
                    }
                }
            };
            map.insert(resource);
        }
        Ok(map)
    }

    fn delete_resources(&self, resources: &mut ResourceMap) -> Result<(), ResolveError> {
        for resource in resources.values_mut() {
            resource.state = ResourceState::Deleted;
        }
        Ok(())
    }

    fn resolve_outputs(
        &self,
        resources: &ResourceMap,
        tree: &TemplateTree,
    ) -> Result<OutputMap, ResolveError> {
        let mut outputs = OutputMap::new();
        let Some(declared) = section_map(tree.outputs(), "Outputs")? else {
            return Ok(outputs);
        };
        for (key, decl) in declared {
            let Some(raw) = decl.get("Value") else {
                return Err(ResolveError::InvalidSection {
                    section: "Outputs",
                    reason: format!("output '{}' has no 'Value'", key),
                });
            };
            let value = match raw.get("Ref").and_then(Value::as_str) {
                Some(target) => resolve_ref(resources, key, target)?,
                None => scalar_to_string(raw),
            };
            outputs.insert(Output {
                key: key.clone(),
                value,
                description: decl
                    .get("Description")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                export_name: decl
                    .get("Export")
                    .and_then(|e| e.get("Name"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
            });
        }
        Ok(outputs)
    }
}

fn resolve_ref(resources: &ResourceMap, output: &str, target: &str) -> Result<String, ResolveError> {
    if let Some(resource) = resources.get(target) {
        return Ok(resource.physical_id.clone());
    }
    if let Some(value) = resources.resolved_parameters().get(target) {
        return Ok(value.clone());
    }
    Err(ResolveError::UnresolvedReference {
        output: output.to_string(),
        target: target.to_string(),
    })
}

fn section_map<'t>(
    section: Option<&'t Value>,
    name: &'static str,
) -> Result<Option<&'t Map<String, Value>>, ResolveError> {
    match section {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(ResolveError::InvalidSection {
            section: name,
            reason: "must be a mapping".to_string(),
        }),
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn physical_id(stack_name: &str, logical_id: &str) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..PHYSICAL_ID_SUFFIX_LEN)
        .map(|_| PHYSICAL_ID_CHARSET[rng.gen_range(0..PHYSICAL_ID_CHARSET.len())] as char)
        .collect();
    format!("{}-{}-{}", stack_name, logical_id, suffix)
}

fn invalid(logical_id: &str, reason: &str) -> ResolveError {
    ResolveError::InvalidResource {
        logical_id: logical_id.to_string(),
        reason: reason.to_string(),
    }
}
