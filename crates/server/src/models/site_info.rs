//! Site settings singleton.
//!
//! A single `site_info` row holds the public site copy, social links,
//! section-visibility toggles, and the chat-widget configuration. When the
//! row does not exist yet, reads fall back to a hard-coded default object so
//! callers never have to distinguish "no row" from "empty field".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use veranda_core::SiteInfoId;

/// The site settings record.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SiteInfo {
    pub id: SiteInfoId,
    pub site_url: String,
    pub title: String,
    pub name: Option<String>,
    pub logo: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub banner_title: Option<String>,
    pub banner_description: Option<String>,
    pub features_title: Option<String>,
    pub features_description: Option<String>,
    pub reasons_title: Option<String>,
    pub reasons_description: Option<String>,
    pub author: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub youtube: Option<String>,
    pub tiktok: Option<String>,
    pub address: Option<String>,
    pub contact: Option<String>,
    pub og_image: Option<String>,
    pub og_type: Option<String>,
    pub twitter_card: Option<String>,
    // Section visibility toggles
    pub show_slides: bool,
    pub show_banner: bool,
    pub show_features: bool,
    pub show_reasons: bool,
    pub show_posts: bool,
    // Chat widget configuration
    pub chat_enabled: bool,
    pub chat_assistant_id: Option<String>,
    pub chat_api_url: Option<String>,
    #[serde(skip_serializing)]
    pub chat_api_key: Option<String>,
    pub chat_input_placeholder: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<String>,
}

impl SiteInfo {
    /// The hard-coded object returned when no settings row exists yet.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            id: SiteInfoId::new(String::new()),
            site_url: "https://saigondental.ai".to_owned(),
            title: "AI Platform".to_owned(),
            name: Some("AI Platform".to_owned()),
            logo: None,
            description: Some("Nền tảng khám phá trí tuệ nhân tạo.".to_owned()),
            keywords: None,
            banner_title: None,
            banner_description: None,
            features_title: None,
            features_description: None,
            reasons_title: None,
            reasons_description: None,
            author: Some("AI Platform".to_owned()),
            email: None,
            phone: None,
            facebook: None,
            instagram: None,
            twitter: None,
            linkedin: None,
            youtube: None,
            tiktok: None,
            address: None,
            contact: None,
            og_image: None,
            og_type: None,
            twitter_card: None,
            show_slides: true,
            show_banner: true,
            show_features: true,
            show_reasons: true,
            show_posts: true,
            chat_enabled: true,
            chat_assistant_id: None,
            chat_api_url: None,
            chat_api_key: None,
            chat_input_placeholder: None,
            updated_at: Utc::now(),
            updated_by: None,
        }
    }
}

/// Generates the typed partial-update struct for the settings row.
///
/// Each field maps to one updatable column; `columns()` and `bind()` walk the
/// fields in the same declaration order so the dynamic SQL and its bind list
/// always line up.
macro_rules! site_info_patch {
    ($( $field:ident : $ty:ty => $col:literal ),+ $(,)?) => {
        /// Typed partial update for the settings row.
        ///
        /// Omitted fields are left unchanged.
        #[derive(Debug, Clone, Default, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct SiteInfoPatch {
            $( pub $field: Option<$ty>, )+
        }

        impl SiteInfoPatch {
            /// Columns with a pending value, in bind order.
            #[must_use]
            pub fn columns(&self) -> Vec<&'static str> {
                let mut cols = Vec::new();
                $( if self.$field.is_some() { cols.push($col); } )+
                cols
            }

            /// Bind pending values onto `query` in the same order as
            /// [`Self::columns`].
            #[must_use]
            pub fn bind<'q>(
                &'q self,
                mut query: sqlx::query::Query<'q, sqlx::MySql, sqlx::mysql::MySqlArguments>,
            ) -> sqlx::query::Query<'q, sqlx::MySql, sqlx::mysql::MySqlArguments> {
                $( if let Some(value) = &self.$field { query = query.bind(value); } )+
                query
            }

            /// Whether the patch carries any pending change.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.columns().is_empty()
            }
        }
    };
}

site_info_patch! {
    site_url: String => "site_url",
    title: String => "title",
    name: String => "name",
    logo: String => "logo",
    description: String => "description",
    keywords: String => "keywords",
    banner_title: String => "banner_title",
    banner_description: String => "banner_description",
    features_title: String => "features_title",
    features_description: String => "features_description",
    reasons_title: String => "reasons_title",
    reasons_description: String => "reasons_description",
    author: String => "author",
    email: String => "email",
    phone: String => "phone",
    facebook: String => "facebook",
    instagram: String => "instagram",
    twitter: String => "twitter",
    linkedin: String => "linkedin",
    youtube: String => "youtube",
    tiktok: String => "tiktok",
    address: String => "address",
    contact: String => "contact",
    og_image: String => "og_image",
    og_type: String => "og_type",
    twitter_card: String => "twitter_card",
    show_slides: bool => "show_slides",
    show_banner: bool => "show_banner",
    show_features: bool => "show_features",
    show_reasons: bool => "show_reasons",
    show_posts: bool => "show_posts",
    chat_enabled: bool => "chat_enabled",
    chat_assistant_id: String => "chat_assistant_id",
    chat_api_url: String => "chat_api_url",
    chat_api_key: String => "chat_api_key",
    chat_input_placeholder: String => "chat_input_placeholder",
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_populated() {
        let info = SiteInfo::fallback();
        assert_eq!(info.site_url, "https://saigondental.ai");
        assert_eq!(info.title, "AI Platform");
        assert!(info.show_features);
        assert!(info.chat_enabled);
    }

    #[test]
    fn test_patch_columns_follow_supplied_fields() {
        let patch: SiteInfoPatch =
            serde_json::from_str(r#"{"title": "Clinic", "chatEnabled": false}"#).unwrap();
        assert_eq!(patch.columns(), vec!["title", "chat_enabled"]);
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_empty_patch() {
        let patch = SiteInfoPatch::default();
        assert!(patch.is_empty());
        assert!(patch.columns().is_empty());
    }

    #[test]
    fn test_chat_api_key_not_serialized() {
        let mut info = SiteInfo::fallback();
        info.chat_api_key = Some("sk-live-abc".to_owned());
        let json = serde_json::to_string(&info).unwrap();
        assert!(!json.contains("sk-live-abc"));
    }
}
