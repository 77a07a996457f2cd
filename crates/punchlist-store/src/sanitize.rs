/// Turn an attacker-controlled filename into a safe storage key.
///
/// Directory components are stripped, characters outside
/// `[A-Za-z0-9._-]` are dropped, and leading/trailing dots and
/// underscores are trimmed. Idempotent. Returns an empty string when
/// nothing safe remains; callers must reject that case.
pub fn sanitize_filename(name: &str) -> String {
    let basename = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let filtered: String = basename
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    filtered.trim_matches(['.', '_']).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_pass_through() {
        assert_eq!(sanitize_filename("report.pdf"), "report.pdf");
        assert_eq!(sanitize_filename("photo-2024_v2.JPG"), "photo-2024_v2.JPG");
    }

    #[test]
    fn unsafe_characters_are_dropped() {
        assert_eq!(sanitize_filename("rent!!.pdf"), "rent.pdf");
        assert_eq!(sanitize_filename("my file (1).txt"), "myfile1.txt");
        assert_eq!(sanitize_filename("naïve.md"), "nave.md");
    }

    #[test]
    fn directory_components_are_stripped() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("/var/log/app.log"), "app.log");
        assert_eq!(sanitize_filename("..\\..\\windows\\cmd.exe"), "cmd.exe");
        assert!(!sanitize_filename("../../etc/passwd").contains('/'));
        assert!(!sanitize_filename("../../etc/passwd").contains(".."));
    }

    #[test]
    fn leading_and_trailing_dots_trimmed() {
        assert_eq!(sanitize_filename(".hidden"), "hidden");
        assert_eq!(sanitize_filename("name."), "name");
        assert_eq!(sanitize_filename("__init__.py"), "init__.py");
    }

    #[test]
    fn hostile_names_collapse_to_empty() {
        assert_eq!(sanitize_filename(""), "");
        assert_eq!(sanitize_filename(".."), "");
        assert_eq!(sanitize_filename("///"), "");
        assert_eq!(sanitize_filename("!!!"), "");
        assert_eq!(sanitize_filename("日本語"), "");
    }

    #[test]
    fn idempotent() {
        for name in [
            "report.pdf",
            "rent!!.pdf",
            "../../etc/passwd",
            ".hidden",
            "a b c.txt",
            "",
        ] {
            let once = sanitize_filename(name);
            assert_eq!(sanitize_filename(&once), once, "not idempotent for {name:?}");
        }
    }
}
