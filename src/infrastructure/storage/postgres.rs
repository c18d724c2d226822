//! PostgreSQL member store with connection pooling
//!
//! Search queries are assembled with `QueryBuilder` so every criteria value
//! is sent as a bind parameter.

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Execute, Postgres, QueryBuilder, Row};
use tracing::debug;

use crate::domain::member::{Member, MemberBulkUpdate, MemberId, MemberRepository, NewMember};
use crate::domain::search::{
    ContentQuery, CountQuery, Direction, MemberPredicate, MemberQueryExecutor, MemberTeamRow,
    SortOrder,
};
use crate::domain::team::{NewTeam, Team, TeamId};
use crate::domain::DomainError;

/// PostgreSQL storage configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/member_search".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_idle_timeout(mut self, secs: u64) -> Self {
        self.idle_timeout_secs = secs;
        self
    }
}

const SELECT_MEMBER_TEAM: &str = "SELECT m.id AS member_id, m.username, m.age, \
     t.id AS team_id, t.name AS team_name \
     FROM member m LEFT OUTER JOIN team t ON m.team_id = t.id";

const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

/// Member and team tables backed by PostgreSQL
pub struct PostgresMemberStore {
    pool: PgPool,
}

impl Debug for PostgresMemberStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresMemberStore")
            .field("pool_size", &self.pool.size())
            .finish()
    }
}

impl PostgresMemberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool
    pub async fn connect(config: &PostgresConfig) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(std::time::Duration::from_secs(config.idle_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

        Ok(Self::new(pool))
    }

    /// Creates the team and member tables if they don't exist
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS team (
                id BIGSERIAL PRIMARY KEY,
                name VARCHAR(100) NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS member (
                id BIGSERIAL PRIMARY KEY,
                username VARCHAR(100),
                age INTEGER NOT NULL CHECK (age >= 0),
                team_id BIGINT REFERENCES team (id),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_member_team_id ON member (team_id)",
            "CREATE INDEX IF NOT EXISTS idx_team_name ON team (name)",
        ];

        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to create schema: {}", e)))?;
        }

        Ok(())
    }
}

/// Appends ` WHERE p1 AND p2 ...`; nothing when there are no predicates
///
/// With `team_joined` the team name is compared on the joined `t` alias,
/// otherwise through a sub-select on the team table.
fn push_predicates(
    builder: &mut QueryBuilder<'_, Postgres>,
    predicates: &[MemberPredicate],
    team_joined: bool,
) {
    for (i, predicate) in predicates.iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });

        match predicate {
            MemberPredicate::UsernameEq(username) => {
                builder.push("m.username = ").push_bind(username.clone());
            }
            MemberPredicate::TeamNameEq(name) if team_joined => {
                builder.push("t.name = ").push_bind(name.clone());
            }
            MemberPredicate::TeamNameEq(name) => {
                builder
                    .push("m.team_id IN (SELECT id FROM team WHERE name = ")
                    .push_bind(name.clone())
                    .push(")");
            }
            MemberPredicate::AgeGoe(age) => {
                builder.push("m.age >= ").push_bind(*age);
            }
            MemberPredicate::AgeLoe(age) => {
                builder.push("m.age <= ").push_bind(*age);
            }
        }
    }
}

fn push_order_by(builder: &mut QueryBuilder<'_, Postgres>, orders: &[SortOrder]) {
    for (i, order) in orders.iter().enumerate() {
        builder.push(if i == 0 { " ORDER BY " } else { ", " });
        builder.push(order.field.column());
        builder.push(" ");
        builder.push(order.direction.as_sql());

        if order.field.is_nullable() {
            builder.push(match order.direction {
                Direction::Asc => " NULLS LAST",
                Direction::Desc => " NULLS FIRST",
            });
        }
    }
}

fn to_sql_bigint(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn content_sql(query: &ContentQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(SELECT_MEMBER_TEAM);
    push_predicates(&mut builder, query.predicates(), true);
    push_order_by(&mut builder, query.orders());

    if let Some(window) = query.window() {
        builder
            .push(" LIMIT ")
            .push_bind(to_sql_bigint(window.limit))
            .push(" OFFSET ")
            .push_bind(to_sql_bigint(window.offset));
    }

    builder
}

fn count_sql(query: &CountQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(m.id) FROM member m");
    if query.joins_team() {
        builder.push(" LEFT OUTER JOIN team t ON m.team_id = t.id");
    }
    push_predicates(&mut builder, query.predicates(), query.joins_team());

    builder
}

fn bulk_update_sql(
    predicates: &[MemberPredicate],
    update: &MemberBulkUpdate,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE member AS m SET ");
    match update {
        MemberBulkUpdate::SetUsername { username } => {
            builder.push("username = ").push_bind(username.clone());
        }
        MemberBulkUpdate::AddAge { delta } => {
            builder.push("age = m.age + ").push_bind(*delta);
        }
    }
    push_predicates(&mut builder, predicates, false);

    builder
}

fn bulk_delete_sql(predicates: &[MemberPredicate]) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("DELETE FROM member AS m");
    push_predicates(&mut builder, predicates, false);

    builder
}

fn storage_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::storage(format!("Failed to {}: {}", action, e))
}

fn sqlstate(e: &sqlx::Error) -> Option<String> {
    e.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code.into_owned())
}

fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    sqlstate(e).as_deref() == Some(FOREIGN_KEY_VIOLATION)
}

/// Negative or out-of-range ages surface as validation failures; a failed
/// statement leaves every row unchanged
fn age_violation(sqlstate: Option<&str>) -> Option<DomainError> {
    match sqlstate {
        Some(CHECK_VIOLATION) => Some(DomainError::validation("age must not be negative")),
        Some(NUMERIC_VALUE_OUT_OF_RANGE) => Some(DomainError::validation("age out of range")),
        _ => None,
    }
}

fn bulk_update_error(e: sqlx::Error) -> DomainError {
    age_violation(sqlstate(&e).as_deref())
        .unwrap_or_else(|| storage_error("bulk update members", e))
}

fn row_to_team(row: &PgRow) -> Result<Team, sqlx::Error> {
    Ok(Team::from_parts(
        TeamId::new(row.try_get("id")?),
        row.try_get::<String, _>("name")?,
        row.try_get::<DateTime<Utc>, _>("created_at")?,
    ))
}

fn row_to_member(row: &PgRow) -> Result<Member, sqlx::Error> {
    Ok(Member::from_parts(
        MemberId::new(row.try_get("id")?),
        row.try_get("username")?,
        row.try_get("age")?,
        row.try_get::<Option<i64>, _>("team_id")?.map(TeamId::new),
        row.try_get("created_at")?,
    ))
}

fn row_to_member_team(row: &PgRow) -> Result<MemberTeamRow, sqlx::Error> {
    Ok(MemberTeamRow {
        member_id: MemberId::new(row.try_get("member_id")?),
        username: row.try_get("username")?,
        age: row.try_get("age")?,
        team_id: row.try_get::<Option<i64>, _>("team_id")?.map(TeamId::new),
        team_name: row.try_get("team_name")?,
    })
}

const MEMBER_COLUMNS: &str = "id, username, age, team_id, created_at";

#[async_trait]
impl MemberRepository for PostgresMemberStore {
    async fn save_team(&self, team: NewTeam) -> Result<Team, DomainError> {
        let row = sqlx::query("INSERT INTO team (name) VALUES ($1) RETURNING id, name, created_at")
            .bind(team.name())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("insert team", e))?;

        row_to_team(&row).map_err(|e| storage_error("read team", e))
    }

    async fn get_team(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query("SELECT id, name, created_at FROM team WHERE id = $1")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("get team", e))?;

        row.as_ref()
            .map(row_to_team)
            .transpose()
            .map_err(|e| storage_error("read team", e))
    }

    async fn find_team_by_name(&self, name: &str) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query(
            "SELECT id, name, created_at FROM team WHERE name = $1 ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("find team", e))?;

        row.as_ref()
            .map(row_to_team)
            .transpose()
            .map_err(|e| storage_error("read team", e))
    }

    async fn save_member(&self, member: NewMember) -> Result<Member, DomainError> {
        let query = format!(
            "INSERT INTO member (username, age, team_id) VALUES ($1, $2, $3) RETURNING {}",
            MEMBER_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(member.username())
            .bind(member.age())
            .bind(member.team_id().map(|id| id.value()))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    DomainError::not_found(format!(
                        "Team '{}' not found",
                        member.team_id().map(|id| id.to_string()).unwrap_or_default()
                    ))
                } else {
                    storage_error("insert member", e)
                }
            })?;

        row_to_member(&row).map_err(|e| storage_error("read member", e))
    }

    async fn get_member(&self, id: MemberId) -> Result<Option<Member>, DomainError> {
        let query = format!("SELECT {} FROM member WHERE id = $1", MEMBER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("get member", e))?;

        row.as_ref()
            .map(row_to_member)
            .transpose()
            .map_err(|e| storage_error("read member", e))
    }

    async fn update_member(&self, member: Member) -> Result<Member, DomainError> {
        let result = sqlx::query(
            "UPDATE member SET username = $2, age = $3, team_id = $4 WHERE id = $1",
        )
        .bind(member.id().value())
        .bind(member.username())
        .bind(member.age())
        .bind(member.team_id().map(|id| id.value()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                DomainError::not_found(format!(
                    "Team '{}' not found",
                    member.team_id().map(|id| id.to_string()).unwrap_or_default()
                ))
            } else {
                storage_error("update member", e)
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Member '{}' not found",
                member.id()
            )));
        }

        Ok(member)
    }

    async fn find_by_username(&self, username: &str) -> Result<Vec<Member>, DomainError> {
        let query = format!(
            "SELECT {} FROM member WHERE username = $1 ORDER BY id",
            MEMBER_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(username)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("find members", e))?;

        rows.iter()
            .map(row_to_member)
            .collect::<Result<_, _>>()
            .map_err(|e| storage_error("read member", e))
    }

    async fn list_members(&self) -> Result<Vec<Member>, DomainError> {
        let query = format!("SELECT {} FROM member ORDER BY id", MEMBER_COLUMNS);

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("list members", e))?;

        rows.iter()
            .map(row_to_member)
            .collect::<Result<_, _>>()
            .map_err(|e| storage_error("read member", e))
    }

    async fn count_members(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM member")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("count members", e))?;

        Ok(count.max(0) as u64)
    }

    async fn bulk_update(
        &self,
        predicates: &[MemberPredicate],
        update: &MemberBulkUpdate,
    ) -> Result<u64, DomainError> {
        let mut builder = bulk_update_sql(predicates, update);
        let query = builder.build();
        debug!(sql = query.sql(), "Executing bulk update");

        let result = query
            .execute(&self.pool)
            .await
            .map_err(bulk_update_error)?;

        Ok(result.rows_affected())
    }

    async fn bulk_delete(&self, predicates: &[MemberPredicate]) -> Result<u64, DomainError> {
        let mut builder = bulk_delete_sql(predicates);
        let query = builder.build();
        debug!(sql = query.sql(), "Executing bulk delete");

        let result = query
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("bulk delete members", e))?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl MemberQueryExecutor for PostgresMemberStore {
    async fn fetch(&self, query: &ContentQuery) -> Result<Vec<MemberTeamRow>, DomainError> {
        let mut builder = content_sql(query);
        let sql_query = builder.build();
        debug!(sql = sql_query.sql(), "Executing content query");

        let rows = sql_query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("fetch members", e))?;

        rows.iter()
            .map(row_to_member_team)
            .collect::<Result<_, _>>()
            .map_err(|e| storage_error("read member row", e))
    }

    async fn count(&self, query: &CountQuery) -> Result<u64, DomainError> {
        let mut builder = count_sql(query);
        let sql_query = builder.build();
        debug!(sql = sql_query.sql(), "Executing count query");

        let row = sql_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("count members", e))?;

        let count: i64 = row
            .try_get(0)
            .map_err(|e| storage_error("read member count", e))?;

        Ok(count.max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::domain::search::{
        MemberQuery, MemberSearchCriteria, MemberSummary, PageRequest, Sort,
    };
    use crate::infrastructure::member::MemberSearchService;

    #[test]
    fn test_postgres_config_default() {
        let config = PostgresConfig::default();

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.connect_timeout_secs, 30);
        assert_eq!(config.idle_timeout_secs, 600);
    }

    #[test]
    fn test_postgres_config_builder() {
        let config = PostgresConfig::new("postgres://db/members")
            .with_max_connections(20)
            .with_min_connections(5)
            .with_connect_timeout(60)
            .with_idle_timeout(1200);

        assert_eq!(config.url, "postgres://db/members");
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.min_connections, 5);
        assert_eq!(config.connect_timeout_secs, 60);
        assert_eq!(config.idle_timeout_secs, 1200);
    }

    #[test]
    fn test_content_sql_without_criteria() {
        let query = MemberQuery::compose(&MemberSearchCriteria::new()).content();
        let mut builder = content_sql(&query);

        assert_eq!(
            builder.build().sql(),
            format!("{} ORDER BY m.id ASC", SELECT_MEMBER_TEAM)
        );
    }

    #[test]
    fn test_content_sql_binds_every_criteria_value() {
        let criteria = MemberSearchCriteria::new()
            .with_username("member4")
            .with_team_name("teamB")
            .with_age_goe(35)
            .with_age_loe(40);
        let request = PageRequest::new(0, 3)
            .unwrap()
            .with_sort(Sort::parse("teamName:desc").unwrap());
        let query = MemberQuery::compose(&criteria).page(&request);
        let mut builder = content_sql(&query);

        assert_eq!(
            builder.build().sql(),
            format!(
                "{} WHERE m.username = $1 AND t.name = $2 AND m.age >= $3 AND m.age <= $4 \
                 ORDER BY t.name DESC NULLS FIRST, m.id ASC LIMIT $5 OFFSET $6",
                SELECT_MEMBER_TEAM
            )
        );
    }

    #[test]
    fn test_count_sql_skips_join_without_team_predicate() {
        let query = MemberQuery::compose(&MemberSearchCriteria::new().with_age_goe(20)).count();
        let mut builder = count_sql(&query);

        assert_eq!(
            builder.build().sql(),
            "SELECT COUNT(m.id) FROM member m WHERE m.age >= $1"
        );
    }

    #[test]
    fn test_count_sql_joins_for_team_predicate() {
        let query =
            MemberQuery::compose(&MemberSearchCriteria::new().with_team_name("teamA")).count();
        let mut builder = count_sql(&query);

        assert_eq!(
            builder.build().sql(),
            "SELECT COUNT(m.id) FROM member m LEFT OUTER JOIN team t ON m.team_id = t.id \
             WHERE t.name = $1"
        );
    }

    #[test]
    fn test_age_violations_are_validation_errors() {
        assert!(matches!(
            age_violation(Some(CHECK_VIOLATION)),
            Some(DomainError::Validation { .. })
        ));
        assert!(matches!(
            age_violation(Some(NUMERIC_VALUE_OUT_OF_RANGE)),
            Some(DomainError::Validation { .. })
        ));
        assert!(age_violation(Some(FOREIGN_KEY_VIOLATION)).is_none());
        assert!(age_violation(None).is_none());
    }

    #[test]
    fn test_bulk_sql_uses_team_subselect() {
        let predicates = [
            MemberPredicate::TeamNameEq("teamB".to_string()),
            MemberPredicate::AgeLoe(27),
        ];

        let mut update = bulk_update_sql(&predicates, &MemberBulkUpdate::AddAge { delta: 1 });
        assert_eq!(
            update.build().sql(),
            "UPDATE member AS m SET age = m.age + $1 \
             WHERE m.team_id IN (SELECT id FROM team WHERE name = $2) AND m.age <= $3"
        );

        let mut delete = bulk_delete_sql(&[MemberPredicate::AgeLoe(17)]);
        assert_eq!(
            delete.build().sql(),
            "DELETE FROM member AS m WHERE m.age <= $1"
        );
    }

    /// Fresh schema on the database named by `DATABASE_URL`
    async fn live_store() -> Arc<PostgresMemberStore> {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let store = PostgresMemberStore::connect(&PostgresConfig::new(url))
            .await
            .unwrap();

        sqlx::query("DROP TABLE IF EXISTS member, team")
            .execute(&store.pool)
            .await
            .unwrap();
        store.ensure_schema().await.unwrap();

        let team_a = store.save_team(NewTeam::new("teamA").unwrap()).await.unwrap();
        let team_b = store.save_team(NewTeam::new("teamB").unwrap()).await.unwrap();
        for (username, age, team) in [
            ("member1", 10, team_a.id()),
            ("member2", 20, team_a.id()),
            ("member3", 30, team_b.id()),
            ("member4", 40, team_b.id()),
        ] {
            store
                .save_member(NewMember::named(username, age).unwrap().with_team(team))
                .await
                .unwrap();
        }

        Arc::new(store)
    }

    fn usernames(summaries: &[MemberSummary]) -> Vec<String> {
        summaries
            .iter()
            .filter_map(|m| m.username.clone())
            .collect()
    }

    #[tokio::test]
    #[ignore = "needs a PostgreSQL database in DATABASE_URL"]
    async fn test_search_against_postgres() {
        let store = live_store().await;
        let service = MemberSearchService::new(store.clone());

        let criteria = MemberSearchCriteria::new()
            .with_team_name("teamB")
            .with_age_goe(35)
            .with_age_loe(40);
        let found = service.search(&criteria).await.unwrap();
        assert_eq!(usernames(&found), vec!["member4"]);
        assert_eq!(found[0].team_name.as_deref(), Some("teamB"));

        let all = MemberSearchCriteria::new();
        for (offset, limit) in [(0, 3), (3, 3), (0, 10), (2, 2), (10, 3)] {
            let request = PageRequest::new(offset, limit).unwrap();
            let simple = service.search_page(&all, &request).await.unwrap();
            let optimized = service.search_page_optimized(&all, &request).await.unwrap();

            assert_eq!(simple, optimized, "offset {} limit {}", offset, limit);
            assert_eq!(optimized.total_elements(), 4);
        }

        let team_a = MemberSearchCriteria::new().with_team_name("teamA");
        let page = service
            .search_page_optimized(&team_a, &PageRequest::new(0, 1).unwrap())
            .await
            .unwrap();
        assert_eq!(usernames(page.content()), vec!["member1"]);
        assert_eq!(page.total_elements(), 2);

        let sorted = PageRequest::new(0, 2)
            .unwrap()
            .with_sort(Sort::parse("age:desc").unwrap());
        let page = service.search_page(&all, &sorted).await.unwrap();
        assert_eq!(usernames(page.content()), vec!["member4", "member3"]);
    }

    #[tokio::test]
    #[ignore = "needs a PostgreSQL database in DATABASE_URL"]
    async fn test_bulk_update_rejects_negative_age_on_postgres() {
        let store = live_store().await;

        let err = store
            .bulk_update(&[], &MemberBulkUpdate::AddAge { delta: -15 })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));

        let err = store
            .bulk_update(&[], &MemberBulkUpdate::AddAge { delta: i32::MAX })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));

        let mut ages: Vec<i32> = store
            .list_members()
            .await
            .unwrap()
            .iter()
            .map(|m| m.age())
            .collect();
        ages.sort();
        assert_eq!(ages, vec![10, 20, 30, 40]);

        let affected = store
            .bulk_update(
                &[MemberPredicate::TeamNameEq("teamB".to_string())],
                &MemberBulkUpdate::AddAge { delta: -30 },
            )
            .await
            .unwrap();
        assert_eq!(affected, 2);
    }
}
