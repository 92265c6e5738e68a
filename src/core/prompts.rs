// src/core/prompts.rs — Fixed instructions, response schema, and flat-lay template

use minijinja::{context, Environment};

/// System instruction for the analysis model.
pub const ANALYSIS_SYSTEM_INSTRUCTION: &str = "\
You are a senior fashion visual analyst for a premium fashion magazine. \
Break down the outfit in the photo with complete precision for a lookbook.

Focus:
- Identify each garment in detail (e.g. 'Oversized Essentials white hoodie', 'Black Nike leggings').
- Brands and logos: you MUST recognize clearly visible brand logos (Nike, Essentials, Fear of God, etc.) \
and name them in both the breakdown and the recreation prompt.
- Materials: identify fabric textures (fleece, cotton, spandex, polished silver).
- Colors: use clean color names (Optic White, Jet Black, Silver).

Strict rules:
- IGNORE faces, identity, and body shape.
- Write a 'recreationPrompt' that instructs the creation of a tidy \"Professional Fashion Flat Lay\" \
on a clean white background.
- Items are laid out separately but harmoniously, like a high-end e-commerce catalog or a Pinterest aesthetic.";

/// User turn sent alongside the image.
pub const ANALYSIS_PROMPT: &str = "\
Analyze this outfit with a focus on brands and flat-lay layout. Make sure every visible brand logo \
(such as Nike or Essentials) is recorded correctly. Compose a recreation prompt for a perfect flat-lay result.";

/// Built-in synthesis template. `{{ elements }}` receives the recreation prompt.
pub const FLAT_LAY_TEMPLATE: &str = "\
High-end commercial fashion flat-lay photography. Professional studio arrangement of garments on a pure \
solid white background. Elements: {{ elements }}. Perfect centering, clean spacing between items, soft \
shadow for depth, 8k resolution, hyper-realistic fabric textures, accurate branding logos, minimalist aesthetic.";

/// Response schema in the service's OpenAPI subset. All fields required.
pub fn analysis_response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "breakdown": {
                "type": "OBJECT",
                "properties": {
                    "top": { "type": "STRING" },
                    "bottom": { "type": "STRING" },
                    "footwear": { "type": "STRING" },
                    "accessories": { "type": "STRING" }
                },
                "required": ["top", "bottom", "footwear", "accessories"]
            },
            "colorPalette": { "type": "ARRAY", "items": { "type": "STRING" } },
            "styleCategory": { "type": "STRING" },
            "materialHighlights": { "type": "ARRAY", "items": { "type": "STRING" } },
            "aestheticVibe": { "type": "STRING" },
            "recreationPrompt": { "type": "STRING" }
        },
        "required": [
            "breakdown",
            "colorPalette",
            "styleCategory",
            "materialHighlights",
            "aestheticVibe",
            "recreationPrompt"
        ]
    })
}

/// Substitute the recreation prompt into a flat-lay template.
///
/// The prompt is passed as a value, so template syntax inside it is not evaluated.
pub fn render_flat_lay(template: &str, elements: &str) -> Result<String, minijinja::Error> {
    let env = Environment::new();
    env.render_str(template, context! { elements => elements })
}

/// Whether `template` parses and reads the `elements` variable somewhere.
pub fn references_elements(template: &str) -> Result<bool, minijinja::Error> {
    let env = Environment::new();
    let parsed = env.template_from_str(template)?;
    Ok(parsed.undeclared_variables(false).contains("elements"))
}
