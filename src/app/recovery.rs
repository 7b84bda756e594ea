#[must_use]
pub fn get_suggestions(msg: &str) -> Vec<String> {
    let mut suggestions = Vec::new();
    let msg_lower = msg.to_lowercase();

    if msg_lower.contains("\"default\" folder cannot") {
        suggestions
            .push("Move its commands elsewhere instead; the default folder always stays".to_string());
    }

    if msg_lower.contains("already exists") {
        suggestions.push("Pick a different folder name".to_string());
    }

    if msg_lower.contains("invalid json") || msg_lower.contains("expected an array") {
        suggestions.push(
            "Import expects a JSON array of {\"name\", \"commands\"} objects, as written by export"
                .to_string(),
        );
    }

    if msg_lower.contains("no such file") || msg_lower.contains("not found") {
        suggestions.push("Check the path; relative paths start in the launch directory".to_string());
    }

    if msg_lower.contains("permission denied") {
        suggestions.push("Check write permissions on the target file".to_string());
    }

    if msg_lower.contains("failed to access settings") {
        suggestions.push(
            "Check ~/.config/favcmd/settings.json is valid JSON (or set FAVCMD_SETTINGS)"
                .to_string(),
        );
    }

    if msg_lower.contains("tree changed") {
        suggestions.push("Press F5 to reload".to_string());
    }

    if msg_lower.contains("clipboard") {
        suggestions.push("No clipboard available; copy the command from the tree".to_string());
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestions() {
        let s = get_suggestions("The \"default\" folder cannot be deleted.");
        assert_eq!(s.len(), 1);

        let s = get_suggestions("Failed to import commands: Invalid JSON format. Expected an array of folders.");
        assert!(s[0].contains("JSON array"));

        let s = get_suggestions("Failed to export commands: Permission denied (os error 13)");
        assert!(s.contains(&"Check write permissions on the target file".to_string()));

        assert!(get_suggestions("Moved command \"Status\"").is_empty());
    }
}
