pub const FUSION_SYSTEM: &str = include_str!("../data/prompts/fusion_system.txt");
pub const FUSION_USER: &str = include_str!("../data/prompts/fusion_user.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}
