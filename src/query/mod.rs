//! Per-query envelope.
//!
//! The host sends a batch of queries, each with a reference id and a JSON
//! body. Every query is run and converted on its own: a failure is
//! attached to that query's response and the rest of the batch carries on.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::convert::{convert, Format};
use crate::frame::Frame;
use crate::record::ResultSource;
use crate::{Error, Result};

/// Query settings carried in the JSON body of a data query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryModel {
    #[serde(rename = "cypherQuery", default)]
    pub cypher_query: String,
    #[serde(rename = "Format", default)]
    pub format: Format,
}

impl QueryModel {
    pub fn new(cypher_query: impl Into<String>, format: Format) -> Self {
        Self { cypher_query: cypher_query.into(), format }
    }

    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        Self::deserialize(json).map_err(|e| Error::InvalidQuery(e.to_string()))
    }
}

/// One query of a batch as sent by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct DataQuery {
    pub ref_id: String,
    pub json: serde_json::Value,
}

impl DataQuery {
    pub fn new(ref_id: impl Into<String>, model: &QueryModel) -> Result<Self> {
        Ok(Self { ref_id: ref_id.into(), json: serde_json::to_value(model)? })
    }
}

/// Frames or error of a single query.
#[derive(Debug, Default)]
pub struct DataResponse {
    pub frames: Vec<Frame>,
    pub error: Option<Error>,
}

/// Responses of a batch, keyed by reference id.
#[derive(Debug, Default)]
pub struct QueryDataResponse {
    pub responses: BTreeMap<String, DataResponse>,
}

/// Runs Cypher statements. Implemented by the database client.
#[async_trait]
pub trait QueryRunner: Send + Sync {
    type Source: ResultSource + Send;

    async fn run(&self, cypher: &str) -> Result<Self::Source>;
}

/// Run and convert every query of a batch in order.
///
/// A later query with an already used reference id replaces the earlier
/// response.
pub async fn query_data<R>(runner: &R, queries: &[DataQuery]) -> QueryDataResponse
where
    R: QueryRunner + ?Sized,
{
    let mut response = QueryDataResponse::default();
    for query in queries {
        let data = match run_query(runner, query).await {
            Ok(frames) => DataResponse { frames, error: None },
            Err(e) => {
                tracing::error!(ref_id = %query.ref_id, error = %e, "Error in query");
                DataResponse { frames: Vec::new(), error: Some(e) }
            }
        };
        response.responses.insert(query.ref_id.clone(), data);
    }
    response
}

async fn run_query<R>(runner: &R, query: &DataQuery) -> Result<Vec<Frame>>
where
    R: QueryRunner + ?Sized,
{
    let model = QueryModel::from_json(&query.json)?;
    tracing::debug!(ref_id = %query.ref_id, format = model.format.as_str(), cypher = %model.cypher_query, "Execute Cypher query");
    let mut source = runner.run(&model.cypher_query).await?;
    convert(&mut source, model.format)
}
