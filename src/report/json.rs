use crate::types::report::AnalysisResult;

pub fn to_json(result: &AnalysisResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::report::Metrics;
    use crate::types::scoring::Breakdown;
    use serde_json::Value;

    fn sample() -> AnalysisResult {
        AnalysisResult::new(
            72,
            Breakdown::from_values([85, 70, 64, 40, 80]),
            "Solid repository health.".to_string(),
            Metrics {
                file_count: 120,
                commit_count: 340,
                branch_count: 4,
                stars: 57,
                languages: vec!["Rust".to_string(), "Shell".to_string()],
            },
            vec!["Add CI.".to_string()],
        )
    }

    #[test]
    fn json_has_exactly_the_published_keys() {
        let rendered = to_json(&sample()).expect("json should serialize");
        let value: Value = serde_json::from_str(&rendered).expect("json should parse");
        let object = value.as_object().expect("top level should be an object");
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["breakdown", "metrics", "roadmap", "score", "summary"]);

        assert_eq!(value["score"], 72);
        assert_eq!(value["breakdown"]["activity"], 64);
        assert_eq!(value["metrics"]["stars"], 57);
        assert_eq!(value["metrics"]["languages"][1], "Shell");
        assert_eq!(value["roadmap"][0], "Add CI.");
        assert!(value.get("grade").is_none());
    }

    #[test]
    fn json_keeps_field_and_category_order() {
        let rendered = to_json(&sample()).expect("json should serialize");
        let keys = ["\"score\"", "\"breakdown\"", "\"summary\"", "\"metrics\"", "\"roadmap\""];
        let positions: Vec<usize> = keys
            .iter()
            .map(|key| rendered.find(key).expect("key should be present"))
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

        let documentation = rendered.find("\"documentation\"").expect("documentation key");
        let maturity = rendered.find("\"maturity\"").expect("maturity key");
        assert!(documentation < maturity);
    }
}
