//! A module implementing a client for querying subgraphs.

use {
    alloy::primitives::Address,
    anyhow::{Context, Result, bail},
    reqwest::{Client, Url},
    serde::{Deserialize, Serialize, de::DeserializeOwned},
    serde_json::{Map, Value},
    thiserror::Error,
};

/// A general client for querying subgraphs.
#[derive(Clone, Debug)]
pub struct SubgraphClient {
    client: Client,
    subgraph_url: Url,
}

impl SubgraphClient {
    /// Creates a new subgraph client for the subgraph served at `subgraph_url`.
    pub fn new(subgraph_url: Url, client: Client) -> Self {
        Self {
            client,
            subgraph_url,
        }
    }

    /// Performs the specified GraphQL query on the current subgraph.
    pub async fn query<T>(&self, query: &str, variables: Option<Map<String, Value>>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.client
            .post(self.subgraph_url.clone())
            .json(&Query { query, variables })
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.subgraph_url))?
            .error_for_status()?
            .json::<QueryResponse<T>>()
            .await
            .context("failed to decode GraphQL response")?
            .into_result()
    }
}

/// Formats an address the way subgraphs store entity IDs: lower-case hex with
/// a `0x` prefix.
pub fn entity_id(address: &Address) -> String {
    format!("{address:#x}")
}

/// Formats a list of addresses as subgraph entity IDs.
pub fn entity_ids(addresses: &[Address]) -> Vec<String> {
    addresses.iter().map(entity_id).collect()
}

/// A GraphQL query.
#[derive(Serialize)]
struct Query<'a> {
    query: &'a str,
    variables: Option<Map<String, Value>>,
}

/// A GraphQL query response.
///
/// This type gets converted into a Rust `Result` type, while handling invalid
/// responses (with missing data and errors).
#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    #[serde(default = "empty_data")]
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<QueryError>>,
}

impl<T> QueryResponse<T> {
    fn into_result(self) -> Result<T> {
        match self {
            Self {
                data: Some(data),
                errors: None,
            } => Ok(data),
            Self {
                errors: Some(errors),
                data: None,
            } if !errors.is_empty() => {
                // Make sure to log additional errors if there are more than
                // one, and just bubble up the first error.
                for error in &errors[1..] {
                    tracing::warn!("additional GraphQL error: {}", error.message);
                }
                bail!("{}", errors[0])
            }
            _ => bail!("invalid GraphQL response"),
        }
    }
}

#[derive(Debug, Deserialize, Error)]
#[error("{}", .message)]
struct QueryError {
    message: String,
}

/// Function to work around the fact that `#[serde(default)]` on an `Option<T>`
/// requires `T: Default`.
fn empty_data<T>() -> Option<T> {
    None
}
