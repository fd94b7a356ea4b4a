/// Drop tool output lines that contain any of `patterns`. Empty patterns
/// are ignored.
///
/// gcov complains about every companion file it probes for and cannot
/// find; those lines only matter to someone debugging the build tree.
pub fn filter_noise(text: &str, patterns: &[String]) -> String {
    text.lines()
        .filter(|line| {
            !patterns
                .iter()
                .any(|p| !p.is_empty() && line.contains(p.as_str()))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
