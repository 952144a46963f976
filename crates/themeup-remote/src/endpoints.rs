//! URL construction for PostgREST tables and the apply endpoint.

use themeup_core::UpdateChannel;
use url::Url;

use crate::error::{RemoteError, RemoteResult};

/// `{base}/rest/v1/{table}`, tolerating a trailing slash on `base`.
pub fn table_url(base: &str, table: &str) -> RemoteResult<Url> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|()| RemoteError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .extend(["rest", "v1", table]);
    Ok(url)
}

/// Query for the newest active record in `channel`.
///
/// Rows without a channel belong to `stable`. PostgREST `eq` never matches
/// NULL, so the stable filter adds an explicit `is.null` alternative.
pub fn latest_active_url(base: &str, table: &str, channel: UpdateChannel) -> RemoteResult<Url> {
    let mut url = table_url(base, table)?;
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("select", "*")
            .append_pair("is_active", "eq.true");
        match channel {
            UpdateChannel::Stable => {
                query.append_pair("or", "(channel.eq.stable,channel.is.null)");
            }
            other => {
                query.append_pair("channel", &format!("eq.{other}"));
            }
        }
        query
            .append_pair("order", "created_at.desc")
            .append_pair("limit", "1");
    }
    Ok(url)
}

/// PostgREST auth headers: `apikey` plus the same key as bearer token.
pub fn auth_headers(key: Option<&str>) -> Vec<(&'static str, String)> {
    key.map(|key| {
        vec![
            ("apikey", key.to_string()),
            ("Authorization", format!("Bearer {key}")),
        ]
    })
    .unwrap_or_default()
}
