//! The swarm toolset and system prompt.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use hive_core::constants::{TOOL_LOG_THOUGHT, TOOL_WRITE_FILE};

/// A tool offered to the generative backend, JSON-schema parameters and all.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name.
    pub name: &'static str,
    /// What the backend is told the tool does.
    pub description: &'static str,
    /// JSON schema for the arguments object.
    pub parameters: Value,
}

/// The two tools every generation turn offers.
pub fn toolset() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: TOOL_WRITE_FILE,
            description:
                "Writes a complete file to the project. Call this for each file you create.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "path": {
                        "type": "string",
                        "description": "File path like src/App.tsx"
                    },
                    "content": {
                        "type": "string",
                        "description": "Complete file content — full working code"
                    },
                    "description": {
                        "type": "string",
                        "description": "One-line description of what this file does"
                    }
                },
                "required": ["path", "content", "description"]
            }),
        },
        ToolDefinition {
            name: TOOL_LOG_THOUGHT,
            description:
                "Logs a thought or communication from one of the agents. Use this frequently.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "agent": {
                        "type": "string",
                        "enum": ["Manager", "Architect", "Coder", "Designer"]
                    },
                    "thought": {
                        "type": "string",
                        "description": "What this agent is thinking or doing right now"
                    },
                    "type": {
                        "type": "string",
                        "enum": ["planning", "coding", "designing", "reviewing", "decision", "question"]
                    }
                },
                "required": ["agent", "thought", "type"]
            }),
        },
    ]
}

/// System prompt for the swarm manager persona driving every turn.
pub const SYSTEM_PROMPT: &str = r#"You are the Manager of Hive — an elite AI development team that builds SaaS products.

You orchestrate three specialized agents:
- **Architect**: Plans the system design and file structure
- **Coder**: Writes the actual code
- **Designer**: Handles UI/UX decisions

Your workflow for EVERY request:
Phase 1: Discovery (Crucial for uniqueness)
- **Manager Thought**: Call logSwarmThought. ANALYZE the user's prompt. Is it a generic request like "make a dashboard" or "build a fitness app"?
- If YES (generic): You MUST call logSwarmThought with type "question" asking the user a single, highly specific question to gather details (e.g., target audience, unique features, aesthetic vibe). DO NOT PROCEED TO PHASE 2. Stop executing here.
- If NO (detailed): Proceed to Phase 2.

Phase 2: Execution (Only if prompt is detailed)
1. **Architect Thought**: Call logSwarmThought. Design a MODULAR file structure. Don't put everything in App.tsx. Suggested components: Header.tsx, Hero.tsx, Features.tsx, Pricing.tsx, Dashboard.tsx.
2. **Designer Thought**: Call logSwarmThought. Define the visual aesthetic (Luxurious, Technical, Playful, etc.).
3. **Execution**: Call writeFile for EACH file. BE THOROUGH. Write FULL, production-ready React code.
4. **Coder Thought**: Call logSwarmThought after writing all files to confirm the build is ready.

Rules for Code Execution (sandboxed preview environment):
- YOU MUST write an `App.tsx` file as the main entry point. This is critical. Do NOT write `page.tsx`.
- Use Tailwind CSS utility classes. They are pre-configured in the environment.
- Use `lucide-react` for icons.
- You can write multiple components (e.g., `Header.tsx`, `Dashboard.tsx`) and import them into `App.tsx`.
- NO PLACEHOLDERS. Write REAL logic. Complete all features requested.
- If the prompt is about "Crypto", use crypto terms. If "Fitness", use fitness terms."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toolset_has_both_tools() {
        let tools = toolset();
        let names: Vec<&str> = tools.iter().map(|t| t.name).collect();
        assert_eq!(names, [TOOL_WRITE_FILE, TOOL_LOG_THOUGHT]);
    }

    #[test]
    fn write_file_schema_requires_core_fields() {
        let tools = toolset();
        let required = &tools[0].parameters["required"];
        assert!(required.as_array().unwrap().contains(&json!("path")));
        assert!(required.as_array().unwrap().contains(&json!("content")));
    }

    #[test]
    fn thought_schema_enumerates_roles_and_types() {
        let tools = toolset();
        let params = &tools[1].parameters["properties"];
        assert_eq!(params["agent"]["enum"].as_array().unwrap().len(), 4);
        assert_eq!(params["type"]["enum"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn system_prompt_names_the_entry_rule() {
        assert!(SYSTEM_PROMPT.contains("App.tsx"));
        assert!(SYSTEM_PROMPT.contains("logSwarmThought"));
    }
}
