use crate::config::AppConfig;

use super::{DbError, SupabaseClient};

pub fn get_backend(config: &AppConfig) -> Result<SupabaseClient, DbError> {
    SupabaseClient::new(
        &config.supabase_url,
        config.supabase_key.expose(),
        config.request_timeout,
    )
}
