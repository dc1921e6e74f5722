// tests/dispatcher.rs

use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use edithook::engine::{DispatchOptions, Dispatcher};
use edithook::errors::EdithookError;
use edithook::processor::FileProcessor;
use edithook::types::ProcessingError;
use edithook_test_utils::builders::{ConfigMappingBuilder, RunOptionsBuilder, task};
use edithook_test_utils::fake_executor::FakeExecutor;
use edithook_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn sequential() -> DispatchOptions {
    DispatchOptions {
        concurrent: false,
        fail_fast: false,
        verbose: true,
    }
}

fn concurrent() -> DispatchOptions {
    DispatchOptions {
        concurrent: true,
        fail_fast: false,
        verbose: true,
    }
}

fn failed_commands(errors: &[ProcessingError]) -> Vec<&str> {
    errors.iter().map(|e| e.command.as_str()).collect()
}

#[tokio::test]
async fn sequential_runs_tasks_in_task_order() -> TestResult {
    with_timeout(async {
        init_tracing();

        // The first command is the slowest; sequential mode must still wait.
        let fake = FakeExecutor::new()
            .delayed("first", Duration::from_millis(50))
            .delayed("second", Duration::from_millis(10));
        let dispatcher = Dispatcher::new(Arc::new(fake.clone()), sequential());

        let tasks = vec![
            task("*.ts", "first", "a.ts"),
            task("*.ts", "second", "a.ts"),
            task("**/*", "third", "a.ts"),
        ];
        let errors = dispatcher.run(tasks, Path::new(".")).await?;

        assert!(errors.is_empty());
        assert_eq!(fake.started(), vec!["first", "second", "third"]);
        assert_eq!(fake.finished(), vec!["first", "second", "third"]);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn sequential_accumulates_every_failure() -> TestResult {
    with_timeout(async {
        init_tracing();

        let fake = FakeExecutor::new().failing("lint").failing("test");
        let dispatcher = Dispatcher::new(Arc::new(fake.clone()), sequential());

        let tasks = vec![
            task("*.ts", "lint", "a.ts"),
            task("*.ts", "fmt", "a.ts"),
            task("*.ts", "test", "a.ts"),
        ];
        let errors = dispatcher.run(tasks, Path::new(".")).await?;

        assert_eq!(fake.started(), vec!["lint", "fmt", "test"]);
        assert_eq!(failed_commands(&errors), vec!["lint", "test"]);

        let first = &errors[0];
        assert_eq!(first.pattern, "*.ts");
        assert_eq!(first.exit_code, Some(1));
        assert_eq!(first.stderr, "lint failed");
        assert_eq!(first.stdout, None);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn fail_fast_sequential_stops_before_next_command() -> TestResult {
    with_timeout(async {
        init_tracing();

        let fake = FakeExecutor::new().failing("lint");
        let options = DispatchOptions {
            fail_fast: true,
            ..sequential()
        };
        let dispatcher = Dispatcher::new(Arc::new(fake.clone()), options);

        let tasks = vec![task("*.ts", "lint", "a.ts"), task("**/*.ts", "fmt", "a.ts")];
        let result = dispatcher.run(tasks, Path::new(".")).await;

        match result {
            Err(EdithookError::CommandFailed {
                command,
                pattern,
                exit_code,
            }) => {
                assert_eq!(command, "lint");
                assert_eq!(pattern, "*.ts");
                assert_eq!(exit_code, Some(1));
            }
            other => panic!("Expected CommandFailed, got: {:?}", other),
        }
        assert_eq!(fake.started(), vec!["lint"]);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn concurrent_launches_everything_before_waiting() -> TestResult {
    with_timeout(async {
        init_tracing();

        let fake = FakeExecutor::new()
            .delayed("slow", Duration::from_millis(200))
            .delayed("fast", Duration::from_millis(10));
        let dispatcher = Dispatcher::new(Arc::new(fake.clone()), concurrent());

        let tasks = vec![task("*.ts", "slow", "a.ts"), task("*.ts", "fast", "a.ts")];
        let errors = dispatcher.run(tasks, Path::new(".")).await?;

        assert!(errors.is_empty());
        assert_eq!(fake.finished(), vec!["fast", "slow"]);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn concurrent_reports_failures_in_task_order() -> TestResult {
    with_timeout(async {
        init_tracing();

        let fake = FakeExecutor::new()
            .failing("slow")
            .failing("fast")
            .delayed("slow", Duration::from_millis(150))
            .delayed("fast", Duration::from_millis(5));
        let dispatcher = Dispatcher::new(Arc::new(fake.clone()), concurrent());

        let tasks = vec![
            task("*.ts", "slow", "a.ts"),
            task("*.ts", "ok", "a.ts"),
            task("*.ts", "fast", "a.ts"),
        ];
        let errors = dispatcher.run(tasks, Path::new(".")).await?;

        assert_eq!(fake.finished().last().map(String::as_str), Some("slow"));
        assert_eq!(failed_commands(&errors), vec!["slow", "fast"]);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn concurrent_and_sequential_report_the_same_errors() -> TestResult {
    with_timeout(async {
        init_tracing();

        let tasks = vec![
            task("*.ts", "a", "x.ts"),
            task("*.ts", "b", "x.ts"),
            task("*.md", "c", "x.ts"),
            task("*.md", "d", "x.ts"),
        ];

        let make_fake = || {
            FakeExecutor::new()
                .failing("b")
                .failing("d")
                .delayed("b", Duration::from_millis(40))
        };

        let seq = Dispatcher::new(Arc::new(make_fake()), sequential())
            .run(tasks.clone(), Path::new("."))
            .await?;
        let conc = Dispatcher::new(Arc::new(make_fake()), concurrent())
            .run(tasks, Path::new("."))
            .await?;

        assert_eq!(seq, conc);
        assert_eq!(failed_commands(&seq), vec!["b", "d"]);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn fail_fast_concurrent_raises_first_failure_in_task_order() -> TestResult {
    with_timeout(async {
        init_tracing();

        // "late" finishes last but comes first in task order.
        let fake = FakeExecutor::new()
            .failing("late")
            .failing("early")
            .delayed("late", Duration::from_millis(100));
        let options = DispatchOptions {
            fail_fast: true,
            ..concurrent()
        };
        let dispatcher = Dispatcher::new(Arc::new(fake.clone()), options);

        let tasks = vec![task("*.ts", "late", "a.ts"), task("*.ts", "early", "a.ts")];
        let result = dispatcher.run(tasks, Path::new(".")).await;

        match result {
            Err(EdithookError::CommandFailed { command, .. }) => assert_eq!(command, "late"),
            other => panic!("Expected CommandFailed, got: {:?}", other),
        }
        // Both were launched; concurrent mode does not hold anything back.
        assert_eq!(fake.started().len(), 2);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn empty_task_list_is_a_successful_noop() -> TestResult {
    with_timeout(async {
        let fake = FakeExecutor::new();
        let dispatcher = Dispatcher::new(Arc::new(fake.clone()), concurrent());

        let errors = dispatcher.run(Vec::new(), Path::new(".")).await?;

        assert!(errors.is_empty());
        assert!(fake.started().is_empty());
        Ok(())
    })
    .await
}

#[tokio::test]
async fn processor_runs_matching_commands_in_mapping_order() -> TestResult {
    with_timeout(async {
        init_tracing();

        let mapping = ConfigMappingBuilder::new()
            .command("**/*.ts", "prettier --write")
            .commands("src/**/*.ts", &["eslint --fix", "tsc --noEmit"])
            .command("*.md", "markdownlint")
            .build();
        let fake = FakeExecutor::new();
        let processor = FileProcessor::with_backend(
            mapping,
            RunOptionsBuilder::new().sequential().build(),
            Arc::new(fake.clone()),
        );

        let errors = processor.process_file("src/app.ts", Path::new(".")).await?;

        assert!(errors.is_empty());
        assert_eq!(
            fake.started(),
            vec!["prettier --write", "eslint --fix", "tsc --noEmit"]
        );
        Ok(())
    })
    .await
}

#[tokio::test]
async fn processor_with_no_match_runs_nothing() -> TestResult {
    with_timeout(async {
        let mapping = ConfigMappingBuilder::new()
            .command("*.md", "prettier --write")
            .build();
        let fake = FakeExecutor::new();
        let processor = FileProcessor::with_backend(
            mapping,
            RunOptionsBuilder::new().verbose(true).build(),
            Arc::new(fake.clone()),
        );

        let errors = processor.process_file("notes.txt", Path::new(".")).await?;

        assert!(errors.is_empty());
        assert!(fake.started().is_empty());
        Ok(())
    })
    .await
}

#[tokio::test]
async fn processor_fail_fast_skips_second_pattern() -> TestResult {
    with_timeout(async {
        init_tracing();

        let mapping = ConfigMappingBuilder::new()
            .command("*.ts", "lint")
            .command("**/*.ts", "fmt")
            .build();
        let fake = FakeExecutor::new().failing("lint");
        let processor = FileProcessor::with_backend(
            mapping,
            RunOptionsBuilder::new().sequential().fail_fast(true).build(),
            Arc::new(fake.clone()),
        );

        let result = processor.process_file("a.ts", Path::new(".")).await;

        assert!(matches!(result, Err(EdithookError::CommandFailed { .. })));
        assert_eq!(fake.started(), vec!["lint"]);
        Ok(())
    })
    .await
}
