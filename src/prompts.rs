pub const OPTIMIZE_SYSTEM: &str = include_str!("../data/prompts/optimize_system.txt");
pub const OPTIMIZE_USER: &str = include_str!("../data/prompts/optimize_user.txt");

/// Replace `{{key}}` placeholders in a template string.
///
/// Values are inserted verbatim; no escaping is applied.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_var() {
        assert_eq!(
            render("Hello {{name}}!", &[("name", "world")]),
            "Hello world!"
        );
    }

    #[test]
    fn test_render_inserts_value_verbatim() {
        assert_eq!(
            render("say: {{prompt}}", &[("prompt", "\"quoted\" {{braces}} \n")]),
            "say: \"quoted\" {{braces}} \n"
        );
    }

    #[test]
    fn test_prompts_are_non_empty() {
        assert!(!OPTIMIZE_SYSTEM.is_empty());
        assert!(!OPTIMIZE_USER.is_empty());
    }

    #[test]
    fn test_system_prompt_sets_role() {
        assert!(OPTIMIZE_SYSTEM.contains("optimizing and enhancing text"));
        assert!(OPTIMIZE_SYSTEM.contains("professional, clear, and engaging"));
    }

    #[test]
    fn test_user_prompt_wraps_input() {
        assert_eq!(
            render(OPTIMIZE_USER, &[("prompt", "hi")]),
            "Please optimize and enhance the following text: hi"
        );
    }
}
