use anyhow::Context;
use lambda_http::{Body, Error, Request, Response, http::StatusCode};
use s3_client::{ListedObject, S3};
use serde_json::Value;

use crate::config::{Config, get_verbose};
use crate::model::{ModelsResponse, patch_model};

/// Handles one inventory request: lists the bucket, fetches every non-empty
/// metadata object, patches the records, and responds with the aggregated
/// collection.
#[tracing::instrument(skip(s3_client, config, event))]
pub async fn handler(
    s3_client: &S3,
    config: &Config,
    event: Request,
) -> Result<Response<Body>, Error> {
    get_verbose().then(|| tracing::trace!(event = ?event, "event info"));

    match build_inventory(s3_client, config).await {
        Ok(models) => {
            let body = serde_json::to_string(&ModelsResponse { models })
                .context("could not serialize response body")?;
            Ok(json_response(StatusCode::OK, body))
        }
        Err(e) => {
            tracing::error!(error = ?e, "could not assemble model inventory");
            Ok(json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                r#"{"message":"could not assemble model inventory"}"#.to_string(),
            ))
        }
    }
}

/// Runs the list, filter, fetch, patch pipeline and returns the patched
/// model records in listing order.
async fn build_inventory(s3_client: &S3, config: &Config) -> anyhow::Result<Vec<Value>> {
    let (metas, movies) = tokio::try_join!(
        s3_client.list_objects(&config.bucket, &config.meta_prefix),
        s3_client.list_objects(&config.bucket, &config.movies_prefix),
    )
    .context("could not list objects")?;

    // The movie listing is not merged into the response; only its size is
    // surfaced for diagnostics.
    tracing::trace!(
        meta_objects = metas.len(),
        movie_objects = movies.len(),
        "listed bucket prefixes"
    );

    let fetches = non_empty_objects(metas)
        .into_iter()
        .map(|object| fetch_model(s3_client, &config.bucket, object));

    let results = futures::future::join_all(fetches).await;

    let mut models = Vec::with_capacity(results.len());
    for result in results {
        models.push(result.context("could not get objects")?);
    }

    for model in &mut models {
        patch_model(model, &config.public_movies_base_url, config.overrides);
        tracing::trace!(model = ?model, "patched model record");
    }

    Ok(models)
}

/// Fetches one metadata object and parses it as a JSON document.
async fn fetch_model(s3_client: &S3, bucket: &str, object: ListedObject) -> anyhow::Result<Value> {
    let bytes = s3_client.get(bucket, &object.key).await?;
    decode_model(&object.key, bytes)
}

/// Decodes a raw object body into a JSON document.
fn decode_model(key: &str, bytes: Vec<u8>) -> anyhow::Result<Value> {
    let body = String::from_utf8(bytes).context(format!("object {key} is not valid utf-8"))?;
    serde_json::from_str(&body).context(format!("object {key} is not valid json"))
}

/// Drops the zero-byte placeholder entries object stores create for
/// "directories", keeping the listing order.
fn non_empty_objects(objects: Vec<ListedObject>) -> Vec<ListedObject> {
    objects.into_iter().filter(|object| object.size > 0).collect()
}

/// Builds a JSON response carrying the permissive CORS header the frontend
/// relies on (preflight OPTIONS requests are not supported).
fn json_response(status: StatusCode, body: String) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::from(body))
        .expect("failed to render response")
}
