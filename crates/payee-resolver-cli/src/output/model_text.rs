use std::io;

use serde_json::Value;

use super::format::{key_value_rows, truncate};

const MEMBER_PREVIEW_CHARS: usize = 60;

pub fn render_model(data: &Value) -> io::Result<String> {
    let fitted = data
        .get("fitted")
        .and_then(Value::as_bool)
        .ok_or_else(|| io::Error::other("model payload is missing `fitted`"))?;

    let mut lines = vec!["Payee cluster model".to_string(), String::new()];
    lines.extend(key_value_rows(
        &[
            ("Fitted:", if fitted { "yes" } else { "no" }.to_string()),
            ("Corpus:", text_field(data, "corpus_source")),
            ("Corpus size:", number_field(data, "corpus_size")),
            ("Clusters:", number_field(data, "cluster_count")),
            ("Vocabulary:", number_field(data, "vocabulary_size")),
            ("Max distance:", number_field(data, "max_distance")),
            ("Policy:", text_field(data, "policy_version")),
        ],
        2,
    ));

    let clusters = data
        .get("clusters")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if clusters.is_empty() {
        lines.push(String::new());
        lines.push("No clusters. The cluster stage is skipped for every payee.".to_string());
        return Ok(lines.join("\n"));
    }

    for cluster in &clusters {
        lines.push(String::new());
        lines.push(format!(
            "Cluster {}: {} ({} members)",
            number_field(cluster, "cluster"),
            text_field(cluster, "label"),
            number_field(cluster, "member_count"),
        ));
        let members = cluster
            .get("members")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        for member in members.iter().filter_map(Value::as_str) {
            lines.push(format!("  - {}", truncate(member, MEMBER_PREVIEW_CHARS)));
        }
    }

    Ok(lines.join("\n"))
}

fn text_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

fn number_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::Number(number)) => number.to_string(),
        _ => "0".to_string(),
    }
}
