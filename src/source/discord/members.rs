//! Guild member directory backed by a one-time member listing.

use std::collections::HashMap;

use super::DiscordClient;
use super::wire::GuildMember;
use crate::error::Result;
use crate::models::Member;
use crate::source::MemberDirectory;

/// Largest page the list-guild-members endpoint returns.
const MEMBER_PAGE_SIZE: usize = 1000;

/// All guild members indexed by name and by id.
#[derive(Debug, Clone, Default)]
pub struct DiscordDirectory {
    by_name: HashMap<String, Member>,
    by_id: HashMap<String, Member>,
}

impl DiscordDirectory {
    /// Page through the guild's member list.
    ///
    /// Requires the bot to have the server members intent enabled.
    pub(super) async fn load(client: &DiscordClient, guild_id: &str) -> Result<Self> {
        let path = format!("/guilds/{guild_id}/members");
        let mut members = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let mut query = vec![("limit", MEMBER_PAGE_SIZE.to_string())];
            if let Some(id) = &after {
                query.push(("after", id.clone()));
            }

            let page: Vec<GuildMember> = client.get_json(&path, &query).await?;
            let page_len = page.len();
            let last_id = page
                .last()
                .and_then(|m| m.user.as_ref())
                .map(|u| u.id.clone());
            members.extend(page.into_iter().filter_map(|m| m.into_member(guild_id)));

            if page_len < MEMBER_PAGE_SIZE || last_id.is_none() {
                break;
            }
            after = last_id;
        }

        log::info!("Loaded {} guild members", members.len());
        Ok(Self::from_members(members))
    }

    pub fn from_members(members: impl IntoIterator<Item = Member>) -> Self {
        let mut directory = Self::default();
        for member in members {
            directory.by_id.insert(member.id.clone(), member.clone());
            directory.by_name.insert(member.name.clone(), member);
        }
        directory
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl MemberDirectory for DiscordDirectory {
    fn find_by_name(&self, name: &str) -> Option<Member> {
        self.by_name.get(name).cloned()
    }

    fn find_by_id(&self, id: &str) -> Option<Member> {
        self.by_id.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::testing::discord_client;

    fn member(id: &str, name: &str) -> Member {
        Member {
            id: id.into(),
            name: name.into(),
            display_name: name.to_uppercase(),
            avatar_url: format!("https://cdn.example.com/{id}.png"),
        }
    }

    #[test]
    fn test_lookups() {
        let directory = DiscordDirectory::from_members([member("1", "alice"), member("2", "bob")]);

        assert_eq!(directory.len(), 2);
        assert_eq!(directory.find_by_name("alice").unwrap().id, "1");
        assert_eq!(directory.find_by_id("2").unwrap().name, "bob");
        assert!(directory.find_by_name("carol").is_none());
        assert!(directory.find_by_id("3").is_none());
    }

    #[tokio::test]
    async fn test_load_pages_with_after() {
        let server = MockServer::start().await;
        let first: Vec<Value> = (1..=MEMBER_PAGE_SIZE)
            .map(|id| json!({"user": {"id": id.to_string(), "username": format!("user{id}")}}))
            .collect();
        Mock::given(method("GET"))
            .and(path("/guilds/1/members"))
            .and(query_param("limit", "1000"))
            .and(query_param_is_missing("after"))
            .respond_with(ResponseTemplate::new(200).set_body_json(first))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/guilds/1/members"))
            .and(query_param("after", "1000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "user": {"id": "2001", "username": "alice", "global_name": "Alice"},
                    "nick": "Ally"
                },
                {"nick": "no user object"}
            ])))
            .mount(&server)
            .await;

        let directory = discord_client(&server).load_members("1").await.unwrap();

        assert_eq!(directory.len(), MEMBER_PAGE_SIZE + 1);
        assert_eq!(directory.find_by_name("user1000").unwrap().id, "1000");
        let alice = directory.find_by_id("2001").unwrap();
        assert_eq!(alice.name, "alice");
        assert_eq!(alice.display_name, "Ally");
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }
}
