// Cross-cutting prompt fragments. Task-specific prompts live in
// agent/prompts.rs alongside the pipeline that uses them.

/// System prompt applied to every model call; enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
