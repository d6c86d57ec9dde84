//! Integration tests for `DieselPetRepository` against embedded PostgreSQL.
//!
//! Each test gets its own cluster from `pg-embed-setup-unpriv`. Set
//! `SKIP_TEST_CLUSTER=1` where the cluster cannot start.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use pagination::{PageRequest, SortOrder};
use pets::domain::ports::{PetRepository, PetRepositoryError};
use pets::domain::{NewPet, PetChanges, PetId, PetName};
use pets::outbound::persistence::{DbPool, DieselPetRepository, PoolConfig};
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

mod support;

use support::pg_embed::test_cluster;
use support::{create_schema, execute, handle_cluster_setup_failure, reset_database};

const TEST_DB: &str = "diesel_pet_repo_test";

/// Hands out a fixed start time, one minute later on every call.
struct SteppingClock {
    next: Mutex<DateTime<Utc>>,
}

impl SteppingClock {
    fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            next: Mutex::new(start),
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().unwrap_or_else(PoisonError::into_inner);
        let now = *next;
        *next = now + Duration::minutes(1);
        now
    }
}

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    repository: DieselPetRepository,
    database_url: String,
    start: DateTime<Utc>,
}

fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    reset_database(&cluster, TEST_DB)?;
    let database_url = cluster.connection().database_url(TEST_DB);
    create_schema(&database_url)?;

    let config = PoolConfig::new(database_url.clone()).with_max_size(2);
    let pool = runtime
        .block_on(DbPool::connect(config))
        .map_err(|err| err.to_string())?;
    let start = start_time();
    let repository = DieselPetRepository::new(pool, Arc::new(SteppingClock::starting_at(start)));

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        repository,
        database_url,
        start,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(context) => Some(context),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn name(raw: &str) -> PetName {
    PetName::new(raw).expect("valid name")
}

fn insert_all(context: &TestContext, names: &[&str]) -> Vec<PetId> {
    names
        .iter()
        .map(|raw| {
            context
                .runtime
                .block_on(context.repository.insert(&NewPet::new(name(raw))))
                .expect("insert pet")
        })
        .collect()
}

fn listed_names(context: &TestContext, limit: &str, offset: &str, order: &str) -> Vec<String> {
    let page = PageRequest::from_query_text(limit, offset, order);
    context
        .runtime
        .block_on(context.repository.fetch_many(&page))
        .expect("list pets")
        .iter()
        .map(|pet| pet.name().to_string())
        .collect()
}

#[rstest]
fn insert_then_fetch_round_trip(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: insert_then_fetch_round_trip skipped");
        return;
    };

    let ids = insert_all(&context, &["Rex"]);
    let pet = context
        .runtime
        .block_on(context.repository.fetch_one(ids[0]))
        .expect("fetch pet")
        .expect("pet should exist");

    assert_eq!(pet.id(), ids[0]);
    assert_eq!(pet.name().as_str(), "Rex");
    assert_eq!(pet.created_at(), context.start);
    assert!(
        pet.updated_at().is_none(),
        "insert writes NULL over the column default"
    );
}

#[rstest]
fn ids_come_from_the_sequence(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: ids_come_from_the_sequence skipped");
        return;
    };

    let ids = insert_all(&context, &["Rex", "Velho"]);
    assert_eq!(ids[0].get(), 1);
    assert_eq!(ids[1].get(), 2);
}

#[rstest]
fn update_sets_updated_at_and_keeps_created_at(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: update_sets_updated_at_and_keeps_created_at skipped");
        return;
    };

    let ids = insert_all(&context, &["Velho"]);
    context
        .runtime
        .block_on(
            context
                .repository
                .update(&PetChanges::new(ids[0], name("Melho"))),
        )
        .expect("update pet");
    let pet = context
        .runtime
        .block_on(context.repository.fetch_one(ids[0]))
        .expect("fetch pet")
        .expect("pet should exist");

    assert_eq!(pet.id(), ids[0]);
    assert_eq!(pet.name().as_str(), "Melho");
    assert_eq!(pet.created_at(), context.start);
    assert_eq!(pet.updated_at(), Some((context.start + Duration::minutes(1)).fixed_offset()));
}

#[rstest]
fn update_and_delete_of_missing_rows_succeed(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: update_and_delete_of_missing_rows_succeed skipped");
        return;
    };

    let missing = PetId::new(42).expect("valid id");
    context
        .runtime
        .block_on(context.repository.update(&PetChanges::new(missing, name("Rex"))))
        .expect("update of a missing row");
    context
        .runtime
        .block_on(context.repository.delete(missing))
        .expect("delete of a missing row");
}

#[rstest]
fn delete_removes_the_row(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: delete_removes_the_row skipped");
        return;
    };

    let ids = insert_all(&context, &["Rex", "Velho"]);
    context
        .runtime
        .block_on(context.repository.delete(ids[0]))
        .expect("delete pet");

    let gone = context
        .runtime
        .block_on(context.repository.fetch_one(ids[0]))
        .expect("fetch pet");
    assert!(gone.is_none());
    assert_eq!(listed_names(&context, "", "", ""), vec!["Velho"]);
}

#[rstest]
#[case("", "", "asc", &["A", "B", "C"])]
#[case("", "", "DESC", &["C", "B", "A"])]
#[case("2", "", "asc", &["A", "B"])]
#[case("2", "1", "asc", &["B", "C"])]
#[case("0", "1", "desc", &["B", "A"])]
#[case("x", "y", "asc", &["A", "B", "C"])]
#[case("", "5", "asc", &[])]
fn fetch_many_applies_order_limit_and_offset(
    repo_context: Option<TestContext>,
    #[case] limit: &str,
    #[case] offset: &str,
    #[case] order: &str,
    #[case] expected: &[&str],
) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: fetch_many_applies_order_limit_and_offset skipped");
        return;
    };

    insert_all(&context, &["A", "B", "C"]);
    assert_eq!(listed_names(&context, limit, offset, order), expected);
}

#[rstest]
fn negative_limit_is_a_query_error(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: negative_limit_is_a_query_error skipped");
        return;
    };

    insert_all(&context, &["Rex"]);
    let page = PageRequest::new(-1, 0, Some(SortOrder::Ascending));
    let err = context
        .runtime
        .block_on(context.repository.fetch_many(&page))
        .expect_err("postgres rejects a negative LIMIT");
    assert!(matches!(err, PetRepositoryError::Query { .. }), "{err:?}");
}

#[rstest]
fn rows_with_blank_names_still_read(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: rows_with_blank_names_still_read skipped");
        return;
    };

    insert_all(&context, &["Rex"]);
    execute(
        &context.database_url,
        "INSERT INTO pets (name, created_at, updated_at) VALUES ('', now(), NULL);",
    )
    .expect("seed blank name");

    assert_eq!(listed_names(&context, "", "", "asc"), vec!["Rex", ""]);
    let blank = context
        .runtime
        .block_on(context.repository.fetch_one(PetId::new(2).expect("valid id")))
        .expect("fetch blank-named pet");
    assert!(blank.is_some());
}

#[rstest]
fn shutdown_closes_the_pool(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: shutdown_closes_the_pool skipped");
        return;
    };

    context.runtime.block_on(context.repository.shutdown());
    let err = context
        .runtime
        .block_on(context.repository.fetch_one(PetId::new(1).expect("valid id")))
        .expect_err("closed pool");
    assert!(matches!(err, PetRepositoryError::Connection { .. }), "{err:?}");
}
