use crate::error::{AgentError, Result};
use crate::types::{ToolOutput, ToolSchema};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A function the language model can call.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Wire name the model calls this tool by.
    fn name(&self) -> &str;

    /// What the tool does, shown to the model.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's arguments.
    fn parameters_schema(&self) -> Value;

    /// Run the tool. Arguments have already passed schema validation.
    async fn execute(&self, args: Value) -> Result<String>;
}

/// Argument rules extracted from a tool's schema at registration, so a
/// malformed schema fails startup instead of a live call.
#[derive(Debug, Default)]
struct CompiledSchema {
    required: Vec<String>,
    enums: HashMap<String, Vec<String>>,
}

struct Entry {
    tool: Arc<dyn Tool>,
    compiled: CompiledSchema,
}

/// Holds every registered tool and dispatches model calls to them.
///
/// Dispatch never returns an error: every failure mode (unknown name, bad
/// arguments, handler failure) becomes a [`ToolOutput`] with `is_error`
/// set, so it can flow back to the model as a normal tool result.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Entry>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, validating its parameter schema first.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let name = tool.name().to_string();
        let compiled = compile_schema(&name, &tool.parameters_schema())?;
        debug!("Registered tool: {}", name);
        self.tools.insert(name, Entry { tool, compiled });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).map(|entry| Arc::clone(&entry.tool))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn list_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Schemas for all registered tools, sorted by name.
    pub fn schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self
            .tools
            .values()
            .map(|entry| ToolSchema {
                name: entry.tool.name().to_string(),
                description: entry.tool.description().to_string(),
                parameters: entry.tool.parameters_schema(),
            })
            .collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Execute a tool call end to end.
    pub async fn execute(&self, tool_name: &str, tool_call_id: &str, args: Value) -> ToolOutput {
        let Some(entry) = self.tools.get(tool_name) else {
            return ToolOutput {
                tool_call_id: tool_call_id.to_string(),
                content: format!("Error: Unknown function '{tool_name}'"),
                is_error: true,
            };
        };

        // Models send null when a tool takes no arguments.
        let args = if args.is_null() { json!({}) } else { args };

        if let Some(problem) = validate_args(&entry.compiled, &args) {
            return ToolOutput {
                tool_call_id: tool_call_id.to_string(),
                content: problem,
                is_error: true,
            };
        }

        match entry.tool.execute(args).await {
            Ok(content) => ToolOutput {
                tool_call_id: tool_call_id.to_string(),
                content,
                is_error: false,
            },
            Err(err) => {
                let message = match err {
                    AgentError::ToolExecution { message, .. } => message,
                    other => other.to_string(),
                };
                ToolOutput {
                    tool_call_id: tool_call_id.to_string(),
                    content: format!("Error executing {tool_name}: {message}"),
                    is_error: true,
                }
            }
        }
    }
}

fn compile_schema(tool_name: &str, schema: &Value) -> Result<CompiledSchema> {
    let Some(schema) = schema.as_object() else {
        return Err(AgentError::Schema(format!(
            "{tool_name}: parameters schema must be a JSON object"
        )));
    };

    let mut property_names: Vec<String> = Vec::new();
    let mut enums = HashMap::new();
    if let Some(properties) = schema.get("properties") {
        let Some(properties) = properties.as_object() else {
            return Err(AgentError::Schema(format!(
                "{tool_name}: properties must be a JSON object"
            )));
        };
        for (key, prop) in properties {
            property_names.push(key.clone());
            if let Some(allowed) = prop.get("enum") {
                let values = string_array(allowed).ok_or_else(|| {
                    AgentError::Schema(format!(
                        "{tool_name}: enum for {key} must be an array of strings"
                    ))
                })?;
                enums.insert(key.clone(), values);
            }
        }
    }

    let mut required = Vec::new();
    if let Some(list) = schema.get("required") {
        required = string_array(list).ok_or_else(|| {
            AgentError::Schema(format!(
                "{tool_name}: required must be an array of strings"
            ))
        })?;
        for param in &required {
            if !property_names.contains(param) {
                return Err(AgentError::Schema(format!(
                    "{tool_name}: required lists unknown parameter {param}"
                )));
            }
        }
    }

    Ok(CompiledSchema { required, enums })
}

fn string_array(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(String::from))
        .collect()
}

/// Check arguments against the compiled rules. Returns the problem to
/// report back to the model, or `None` if the arguments are acceptable.
fn validate_args(compiled: &CompiledSchema, args: &Value) -> Option<String> {
    let Some(map) = args.as_object() else {
        return Some("Invalid arguments: expected a JSON object".to_string());
    };

    for param in &compiled.required {
        if !map.contains_key(param) {
            return Some(format!("Missing required parameter: {param}"));
        }
    }

    for (key, allowed) in &compiled.enums {
        let Some(value) = map.get(key) else { continue };
        // Null means the model chose not to supply the argument.
        if value.is_null() {
            continue;
        }
        let shown = match value.as_str() {
            Some(s) => s.to_string(),
            None => value.to_string(),
        };
        if !allowed.contains(&shown) {
            return Some(format!(
                "Invalid value for {key}: {shown}. Must be one of: {}",
                allowed.join(", ")
            ));
        }
    }

    None
}

/// Convert tool schemas to the OpenAI function-calling wire format.
pub fn schemas_to_openai_tools(schemas: &[ToolSchema]) -> Vec<Value> {
    schemas
        .iter()
        .map(|schema| {
            json!({
                "type": "function",
                "function": {
                    "name": schema.name,
                    "description": schema.description,
                    "parameters": schema.parameters,
                }
            })
        })
        .collect()
}
