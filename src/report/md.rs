use crate::types::report::AnalysisResult;

pub fn to_markdown(result: &AnalysisResult) -> String {
    let mut output = String::new();
    output.push_str("# Repository Report\n\n");
    output.push_str(&format!(
        "Score: {}/100 (Grade {})\n\n",
        result.score(),
        result.grade()
    ));
    output.push_str(&format!("{}\n\n", result.summary()));

    output.push_str("## Breakdown\n\n");
    for score in result.breakdown().iter() {
        output.push_str(&format!("- {}: {}\n", score.category.label(), score.value));
    }
    output.push('\n');

    let metrics = result.metrics();
    output.push_str("## Metrics\n\n");
    output.push_str(&format!(
        "- files: {}\n- commits: {}\n- branches: {}\n- stars: {}\n",
        metrics.file_count, metrics.commit_count, metrics.branch_count, metrics.stars
    ));
    if metrics.languages.is_empty() {
        output.push_str("- languages: none detected\n\n");
    } else {
        output.push_str(&format!("- languages: {}\n\n", metrics.languages.join(", ")));
    }

    output.push_str("## Roadmap\n\n");
    for (index, step) in result.roadmap().iter().enumerate() {
        output.push_str(&format!("{}. {}\n", index + 1, step));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::report::Metrics;
    use crate::types::scoring::Breakdown;

    #[test]
    fn markdown_report_contains_sections() {
        let result = AnalysisResult::new(
            41,
            Breakdown::from_values([85, 30, 12, 0, 40]),
            "Weak repository health.".to_string(),
            Metrics {
                file_count: 9,
                commit_count: 14,
                branch_count: 1,
                stars: 0,
                languages: Vec::new(),
            },
            vec!["Add automated tests.".to_string(), "Set up CI.".to_string()],
        );

        let rendered = to_markdown(&result);
        assert!(rendered.contains("Score: 41/100 (Grade D)"));
        assert!(rendered.contains("## Breakdown"));
        assert!(rendered.contains("- Documentation: 85"));
        assert!(rendered.contains("- languages: none detected"));
        assert!(rendered.contains("1. Add automated tests.\n2. Set up CI.\n"));
    }
}
