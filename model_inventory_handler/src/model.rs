use serde::Serialize;
use serde_json::{Map, Value};

/// The response body: every model metadata document found in the bucket.
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<Value>,
}

/// A fixed description override applied to models whose rewritten source
/// URL contains `needle`.
#[derive(Debug, Clone, Copy)]
pub struct DescriptionOverride {
    pub needle: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
}

/// The hand-curated model descriptions. The needles are disjoint, so at
/// most one override applies to a given model.
pub const DESCRIPTION_OVERRIDES: &[DescriptionOverride] = &[
    DescriptionOverride {
        needle: "dcsm_v6_kf_hirlam",
        title: "DCSM",
        summary: "The Dutch Continental Shelf Model provides daily sea level forecasts.",
    },
    DescriptionOverride {
        needle: "dcsmv6_zunov4_zuno_kf_hirlam",
        title: "ZUNO",
        summary: "The ZUNO model provides daily sea level forecasts for the southern part of the North Sea.",
    },
];

/// Rewrites the model's `uv.src` to its public URL and applies any matching
/// description override. Models without a `uv.src` string are left untouched.
/// The rewrite must run exactly once per fetched document; running it again
/// would prefix the URL twice.
pub fn patch_model(model: &mut Value, public_base_url: &str, overrides: &[DescriptionOverride]) {
    let Some(src) = model
        .pointer("/uv/src")
        .and_then(Value::as_str)
        .filter(|src| !src.is_empty())
    else {
        return;
    };

    let public_src = format!("{public_base_url}{src}");

    if let Some(uv) = model.get_mut("uv").and_then(Value::as_object_mut) {
        uv.insert("src".to_string(), Value::String(public_src.clone()));
    }

    for rule in overrides {
        if public_src.contains(rule.needle) {
            if let Some(metadata) = metadata_object(model) {
                metadata.insert("summary".to_string(), rule.summary.into());
                metadata.insert("title".to_string(), rule.title.into());
            } else {
                tracing::warn!(
                    needle = rule.needle,
                    "model carries a non-object metadata field, skipping description override"
                );
            }
        }
    }
}

/// Returns the model's `metadata` object, inserting an empty one when the
/// document has none. Returns `None` when `metadata` exists but is not an
/// object.
fn metadata_object(model: &mut Value) -> Option<&mut Map<String, Value>> {
    model
        .as_object_mut()?
        .entry("metadata".to_string())
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE_URL: &str = "https://s3-eu-west-1.amazonaws.com/model-inventory/movies/";

    #[test]
    fn rewrites_source_to_public_url() {
        let mut model = json!({
            "uv": {"src": "some_model/run.nc", "scale": 2},
            "metadata": {"title": "some model"}
        });

        patch_model(&mut model, BASE_URL, DESCRIPTION_OVERRIDES);

        assert_eq!(
            model,
            json!({
                "uv": {"src": format!("{BASE_URL}some_model/run.nc"), "scale": 2},
                "metadata": {"title": "some model"}
            })
        );
    }

    #[test]
    fn applies_dcsm_description() {
        let mut model = json!({"uv": {"src": "dcsm_v6_kf_hirlam/foo.nc"}, "metadata": {}});

        patch_model(&mut model, BASE_URL, DESCRIPTION_OVERRIDES);

        assert_eq!(
            model,
            json!({
                "uv": {"src": format!("{BASE_URL}dcsm_v6_kf_hirlam/foo.nc")},
                "metadata": {
                    "summary": "The Dutch Continental Shelf Model provides daily sea level forecasts.",
                    "title": "DCSM"
                }
            })
        );
    }

    #[test]
    fn applies_zuno_description() {
        let mut model = json!({
            "uv": {"src": "dcsmv6_zunov4_zuno_kf_hirlam/bar.nc"},
            "metadata": {"summary": "stale", "title": "stale"}
        });

        patch_model(&mut model, BASE_URL, DESCRIPTION_OVERRIDES);

        assert_eq!(
            model,
            json!({
                "uv": {"src": format!("{BASE_URL}dcsmv6_zunov4_zuno_kf_hirlam/bar.nc")},
                "metadata": {
                    "summary": "The ZUNO model provides daily sea level forecasts for the southern part of the North Sea.",
                    "title": "ZUNO"
                }
            })
        );
    }

    #[test]
    fn leaves_models_without_source_untouched() {
        let mut model = json!({"metadata": {"title": "static"}, "layers": [1, 2]});
        let expected = model.clone();

        patch_model(&mut model, BASE_URL, DESCRIPTION_OVERRIDES);

        assert_eq!(model, expected);
    }

    #[test]
    fn leaves_non_object_documents_untouched() {
        let mut model = json!(["not", "an", "object"]);
        let expected = model.clone();

        patch_model(&mut model, BASE_URL, DESCRIPTION_OVERRIDES);

        assert_eq!(model, expected);
    }

    #[test]
    fn ignores_empty_source_strings() {
        let mut model = json!({"uv": {"src": ""}, "metadata": {}});
        let expected = model.clone();

        patch_model(&mut model, BASE_URL, DESCRIPTION_OVERRIDES);

        assert_eq!(model, expected);
    }

    #[test]
    fn creates_metadata_for_matching_models_without_one() {
        let mut model = json!({"uv": {"src": "dcsm_v6_kf_hirlam/foo.nc"}});

        patch_model(&mut model, BASE_URL, DESCRIPTION_OVERRIDES);

        assert_eq!(
            model.pointer("/metadata/title"),
            Some(&Value::String("DCSM".to_string()))
        );
        assert_eq!(
            model.pointer("/metadata/summary"),
            Some(&Value::String(
                "The Dutch Continental Shelf Model provides daily sea level forecasts.".to_string()
            ))
        );
    }

    #[test]
    fn serializes_models_response() {
        let response = ModelsResponse {
            models: vec![json!({"uv": {"src": "x"}})],
        };

        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"models":[{"uv":{"src":"x"}}]}"#
        );
    }
}
