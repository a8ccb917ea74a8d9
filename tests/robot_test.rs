use foobartory::clock::SimClock;
use foobartory::model::{Action, Stock, MAX_FOOBAR_SALE};
use foobartory::pool::ResourcePool;
use foobartory::robot::{FactoryContext, Robot, RobotId};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use worker_framework::{
    FrameworkError, ShutdownReason, ShutdownSignal, Supervisor, SupervisorClient,
};

// --- Helpers ---

fn stock(foo: u32, bar: u32, foobar: u32, money: u32) -> Stock {
    Stock {
        foo,
        bar,
        foobar,
        money,
    }
}

fn context(
    pool: Arc<ResourcePool>,
    supervisor: SupervisorClient<Robot>,
    speed: u32,
) -> FactoryContext {
    FactoryContext {
        pool,
        supervisor,
        clock: SimClock::new(speed).unwrap(),
        seed: Some(7),
    }
}

/// A client whose supervisor is already gone: every spawn fails.
fn closed_client() -> SupervisorClient<Robot> {
    let (_supervisor, client) = Supervisor::<Robot>::new(1, 30, ShutdownSignal::new());
    client
}

fn standalone(initial: Stock, speed: u32) -> (Arc<ResourcePool>, FactoryContext) {
    let pool = Arc::new(ResourcePool::new(initial));
    let ctx = context(pool.clone(), closed_client(), speed);
    (pool, ctx)
}

// --- Buying robots ---

#[tokio::test(start_paused = true)]
async fn test_buy_worker_grows_population_by_one() {
    let shutdown = ShutdownSignal::new();
    let pool = Arc::new(ResourcePool::new(stock(6, 0, 0, 3)));
    let (supervisor, client) = Supervisor::<Robot>::new(8, 30, shutdown.clone());
    let ctx = context(pool.clone(), client.clone(), 1);
    let handle = tokio::spawn(supervisor.run(ctx.clone()));

    assert!(Action::BuyWorker.is_eligible(&pool.snapshot()));
    assert!(client.roster().await.unwrap().is_empty());

    let mut buyer = Robot::new(RobotId(100), Some(1));
    buyer
        .perform(Action::BuyWorker, &ctx, &shutdown)
        .await
        .unwrap();

    let after = pool.snapshot();
    assert_eq!(after.money, 0);
    assert_eq!(after.foo, 0);
    assert_eq!(client.roster().await.unwrap(), vec![RobotId(1)]);

    shutdown.trigger(ShutdownReason::Requested);
    let report = handle.await.unwrap();
    assert_eq!(report.roster, vec![RobotId(1)]);
}

#[tokio::test(start_paused = true)]
async fn test_buy_worker_without_funds_spawns_nothing() {
    let shutdown = ShutdownSignal::new();
    let pool = Arc::new(ResourcePool::new(stock(6, 0, 0, 2)));
    let (supervisor, client) = Supervisor::<Robot>::new(8, 30, shutdown.clone());
    let ctx = context(pool.clone(), client.clone(), 1);
    let handle = tokio::spawn(supervisor.run(ctx.clone()));

    let mut buyer = Robot::new(RobotId(100), Some(1));
    buyer
        .perform(Action::BuyWorker, &ctx, &shutdown)
        .await
        .unwrap();

    assert_eq!(pool.snapshot(), stock(6, 0, 0, 2));
    assert!(client.roster().await.unwrap().is_empty());

    shutdown.trigger(ShutdownReason::Requested);
    assert!(handle.await.unwrap().roster.is_empty());
}

#[tokio::test]
async fn test_buy_worker_reports_a_closed_supervisor() {
    let (pool, ctx) = standalone(stock(6, 0, 0, 3), 1);
    let mut buyer = Robot::new(RobotId(1), Some(1));
    let result = buyer
        .perform(Action::BuyWorker, &ctx, &ShutdownSignal::new())
        .await;
    assert!(matches!(result, Err(FrameworkError::SupervisorClosed)));
    // The refused robot is refunded.
    assert_eq!(pool.snapshot(), stock(6, 0, 0, 3));
}

#[tokio::test(start_paused = true)]
async fn test_second_buyer_at_cap_keeps_its_money() {
    let shutdown = ShutdownSignal::new();
    let pool = Arc::new(ResourcePool::new(stock(12, 0, 0, 6)));
    let (supervisor, client) = Supervisor::<Robot>::new(8, 1, shutdown.clone());
    let ctx = context(pool.clone(), client.clone(), 1);
    let handle = tokio::spawn(supervisor.run(ctx.clone()));

    let mut first = Robot::new(RobotId(100), Some(1));
    first
        .perform(Action::BuyWorker, &ctx, &shutdown)
        .await
        .unwrap();
    assert_eq!(
        shutdown.reason(),
        Some(ShutdownReason::PopulationCap { population: 1 })
    );
    let before = pool.snapshot();
    assert_eq!(before, stock(6, 0, 0, 3));

    // Still eligible on paper, but the factory is closing.
    assert!(Action::BuyWorker.is_eligible(&before));
    let mut second = Robot::new(RobotId(101), Some(2));
    let result = second.perform(Action::BuyWorker, &ctx, &shutdown).await;
    assert!(matches!(result, Err(FrameworkError::Cancelled)));
    assert_eq!(pool.snapshot(), before);

    let report = handle.await.unwrap();
    assert_eq!(report.roster, vec![RobotId(1)]);
}

// --- Crafting and selling ---

#[tokio::test(start_paused = true)]
async fn test_make_foobar_conserves_resources() {
    let (pool, ctx) = standalone(stock(40, 40, 0, 0), 1);
    let shutdown = ShutdownSignal::new();
    let mut robot = Robot::new(RobotId(1), Some(5));

    let mut successes = 0;
    let mut failures = 0;
    for _ in 0..40 {
        let before = pool.snapshot();
        robot
            .perform(Action::MakeFoobar, &ctx, &shutdown)
            .await
            .unwrap();
        let after = pool.snapshot();

        assert_eq!(after.foo, before.foo - 1);
        if after.foobar == before.foobar + 1 {
            assert_eq!(after.bar, before.bar - 1);
            successes += 1;
        } else {
            assert_eq!(after.foobar, before.foobar);
            assert_eq!(after.bar, before.bar);
            failures += 1;
        }
    }
    assert!(successes > 0, "60% success rate never hit in 40 attempts");
    assert!(failures > 0, "40% failure rate never hit in 40 attempts");
}

#[tokio::test(start_paused = true)]
async fn test_make_foobar_without_inputs_is_a_no_op() {
    let (pool, ctx) = standalone(stock(0, 3, 0, 0), 1);
    let mut robot = Robot::new(RobotId(1), Some(5));
    robot
        .perform(Action::MakeFoobar, &ctx, &ShutdownSignal::new())
        .await
        .unwrap();
    assert_eq!(pool.snapshot(), stock(0, 3, 0, 0));
}

#[tokio::test(start_paused = true)]
async fn test_sell_foobar_conserves_value() {
    let (pool, ctx) = standalone(stock(0, 0, 30, 0), 1);
    let shutdown = ShutdownSignal::new();
    let mut robot = Robot::new(RobotId(1), Some(9));

    while pool.snapshot().foobar > 0 {
        let before = pool.snapshot();
        robot
            .perform(Action::SellFoobar, &ctx, &shutdown)
            .await
            .unwrap();
        let after = pool.snapshot();

        let sold = before.foobar - after.foobar;
        assert_eq!(after.money - before.money, sold);
        assert!(sold >= 1 && sold <= before.foobar.min(MAX_FOOBAR_SALE));
    }
    assert_eq!(pool.snapshot().money, 30);
}

// --- Timing ---

#[tokio::test(start_paused = true)]
async fn test_relocation_only_on_task_change() {
    let (_pool, ctx) = standalone(Stock::EMPTY, 1);
    let shutdown = ShutdownSignal::new();
    let mut robot = Robot::new(RobotId(1), Some(1));

    let started = Instant::now();
    robot
        .perform(Action::MiningFoo, &ctx, &shutdown)
        .await
        .unwrap();
    assert_eq!(started.elapsed(), Duration::from_secs(1));

    let started = Instant::now();
    robot
        .perform(Action::MiningFoo, &ctx, &shutdown)
        .await
        .unwrap();
    assert_eq!(started.elapsed(), Duration::from_secs(1));

    // Five units of walking, then two of assembly.
    let started = Instant::now();
    robot
        .perform(Action::MakeFoobar, &ctx, &shutdown)
        .await
        .unwrap();
    assert_eq!(started.elapsed(), Duration::from_secs(7));
    assert_eq!(robot.last_action(), Some(Action::MakeFoobar));
}

#[tokio::test(start_paused = true)]
async fn test_speed_factor_divides_every_delay() {
    let (_pool, ctx) = standalone(stock(0, 0, 2, 0), 10);
    let shutdown = ShutdownSignal::new();
    let mut robot = Robot::new(RobotId(1), Some(1));

    let started = Instant::now();
    robot
        .perform(Action::MiningFoo, &ctx, &shutdown)
        .await
        .unwrap();
    assert_eq!(started.elapsed(), Duration::from_millis(100));

    let started = Instant::now();
    robot
        .perform(Action::SellFoobar, &ctx, &shutdown)
        .await
        .unwrap();
    assert_eq!(started.elapsed(), Duration::from_millis(1_500));
}

#[tokio::test(start_paused = true)]
async fn test_mining_bar_duration_stays_in_range() {
    let (pool, ctx) = standalone(Stock::EMPTY, 1);
    let shutdown = ShutdownSignal::new();
    let mut robot = Robot::new(RobotId(1), Some(3));

    for _ in 0..30 {
        let started = Instant::now();
        robot
            .perform(Action::MiningBar, &ctx, &shutdown)
            .await
            .unwrap();
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(500) && elapsed <= Duration::from_secs(2));
    }
    assert_eq!(pool.snapshot().bar, 30);
}

// --- Cancellation ---

#[tokio::test(start_paused = true)]
async fn test_cancelled_action_leaves_pool_untouched() {
    let (pool, ctx) = standalone(stock(0, 0, 3, 0), 1);
    let shutdown = ShutdownSignal::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(5)).await;
        trigger.trigger(ShutdownReason::Requested);
    });

    let mut robot = Robot::new(RobotId(1), Some(1));
    let started = Instant::now();
    let result = robot.perform(Action::SellFoobar, &ctx, &shutdown).await;

    assert!(matches!(result, Err(FrameworkError::Cancelled)));
    assert_eq!(started.elapsed(), Duration::from_secs(5));
    assert_eq!(pool.snapshot(), stock(0, 0, 3, 0));
}

#[tokio::test]
async fn test_no_work_after_shutdown() {
    let (pool, ctx) = standalone(Stock::EMPTY, 1);
    let shutdown = ShutdownSignal::new();
    shutdown.trigger(ShutdownReason::Requested);

    let mut robot = Robot::new(RobotId(1), Some(1));
    let result = robot.perform(Action::MiningFoo, &ctx, &shutdown).await;
    assert!(matches!(result, Err(FrameworkError::Cancelled)));
    assert_eq!(pool.snapshot(), Stock::EMPTY);
}

// --- Scenario ---

#[tokio::test(start_paused = true)]
async fn test_single_robot_never_sells_a_lone_foobar() {
    let (pool, ctx) = standalone(Stock::SEEDED, 1);
    let shutdown = ShutdownSignal::new();
    let mut robot = Robot::new(RobotId(1), Some(2024));

    for _ in 0..300 {
        let snapshot = pool.snapshot();
        let action = robot.choose(&snapshot);
        assert!(action.is_eligible(&snapshot));
        if snapshot.foobar <= 1 {
            assert_ne!(action, Action::SellFoobar);
        }
        // Buying fails on the closed supervisor once paid for; that is fine here.
        let _ = robot.perform(action, &ctx, &shutdown).await;
    }
}
