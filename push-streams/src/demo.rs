//! Record demos on the push executor.
//!
//! Builds the stage chain for each demo whose elements are `User` records
//! and runs it over a copy of the dataset. The printed output of every
//! chain here matches the pull pipeline's output for the same demo.

use tracing::info;
use user_streams::demo::{AGE_THRESHOLD, ELEMENT_INDEX, SALES, WINDOW};
use user_streams::{Demo, SalaryRule, StreamError, User};

use crate::executor::{execute_push, execute_push_traced};
use crate::stage::{
    ElementAtStage, FilterStage, FlatMapStage, GroupKeyStage, MapStage, SkipLastStage, SkipStage,
    Stage, TakeLastStage, TakeStage,
};
use crate::trace::PushTrace;

/// Create the stage chain for `demo`.
///
/// `from` and `create` need no stages: the source already emits each user.
/// Demos whose elements are not users (`just`, `repeat`, `range`,
/// `buffer`, `distinct`) are rejected.
pub fn demo_stages(
    demo: Demo,
    salary_rule: SalaryRule,
) -> Result<Vec<Box<dyn Stage<User>>>, StreamError> {
    let stages: Vec<Box<dyn Stage<User>>> = match demo {
        Demo::From | Demo::Create => vec![],
        Demo::Map => vec![Box::new(MapStage::new(|mut u: User| {
            u.double_age();
            u
        }))],
        Demo::FlatMap => vec![Box::new(FlatMapStage::new(move |mut u: User| {
            salary_rule.upgrade(&mut u);
            vec![u]
        }))],
        Demo::GroupBy => vec![Box::new(GroupKeyStage::new(
            |u: &User| u.location().to_string(),
            SALES.to_string(),
        ))],
        Demo::Filter => vec![Box::new(FilterStage::new(|u: &User| u.age > AGE_THRESHOLD))],
        Demo::Take => vec![Box::new(TakeStage::new(WINDOW))],
        Demo::TakeLast => vec![Box::new(TakeLastStage::<User>::new(WINDOW))],
        Demo::Skip => vec![Box::new(SkipStage::new(WINDOW))],
        Demo::SkipLast => vec![Box::new(SkipLastStage::<User>::new(WINDOW))],
        Demo::ElementAt => vec![Box::new(ElementAtStage::new(ELEMENT_INDEX))],
        Demo::Just | Demo::Repeat | Demo::Range | Demo::Buffer | Demo::Distinct => {
            return Err(StreamError::NotPushable(demo.name().to_string()));
        }
    };
    Ok(stages)
}

/// Run `demo` on the push executor over `users`.
pub fn run_push(
    demo: Demo,
    users: Vec<User>,
    salary_rule: SalaryRule,
) -> Result<Vec<User>, StreamError> {
    let mut stages = demo_stages(demo, salary_rule)?;
    let input_count = users.len();
    let output = execute_push(users, &mut stages);
    info!(demo = demo.name(), input_count, output_count = output.len(), "push run complete");
    Ok(output)
}

/// Run `demo` on the push executor, capturing a trace.
pub fn run_push_traced(
    demo: Demo,
    users: Vec<User>,
    salary_rule: SalaryRule,
) -> Result<(Vec<User>, PushTrace<User>), StreamError> {
    let mut stages = demo_stages(demo, salary_rule)?;
    Ok(execute_push_traced(users, &mut stages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use user_streams::users;

    /// Lines printed by the pull pipeline for `demo`.
    fn pull_lines(demo: Demo, rule: SalaryRule) -> Vec<String> {
        let mut data = users();
        let mut out: Vec<u8> = Vec::new();
        demo.run(&mut data, rule, &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Lines printed by the push executor for `demo`.
    fn push_lines(demo: Demo, rule: SalaryRule) -> Vec<String> {
        run_push(demo, users(), rule)
            .unwrap()
            .iter()
            .map(User::to_string)
            .collect()
    }

    fn assert_equivalence(demo: Demo) {
        for rule in [SalaryRule::Literal, SalaryRule::Corrected] {
            assert_eq!(
                pull_lines(demo, rule),
                push_lines(demo, rule),
                "push output differs from pull for {demo} ({rule:?})"
            );
        }
    }

    #[test]
    fn test_equivalence_all_record_demos() {
        for demo in Demo::ALL {
            if demo_stages(demo, SalaryRule::Literal).is_ok() {
                assert_equivalence(demo);
            }
        }
    }

    #[test]
    fn test_non_record_demos_rejected() {
        for demo in [Demo::Just, Demo::Repeat, Demo::Range, Demo::Buffer, Demo::Distinct] {
            assert!(matches!(
                demo_stages(demo, SalaryRule::Literal),
                Err(StreamError::NotPushable(_))
            ));
        }
    }

    #[test]
    fn test_take_last_independent_of_map() {
        let mut data = users();
        Demo::Map
            .run(&mut data, SalaryRule::Literal, &mut std::io::sink())
            .unwrap();
        // A fresh copy is unaffected by the edits above.
        let out = run_push(Demo::TakeLast, users(), SalaryRule::Literal).unwrap();
        let names: Vec<&str> = out.iter().map(User::name).collect();
        assert_eq!(names, vec!["Angela", "Oscar", "Roy"]);
        assert_eq!(out[2].age, 30);
    }

    #[test]
    fn test_element_at_stops_early() {
        let (out, trace) = run_push_traced(Demo::ElementAt, users(), SalaryRule::Literal).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name(), "Darell");
        assert_eq!(trace.element_traces.len(), 4);
        assert!(trace.stopped_early);
    }

    #[test]
    fn test_element_at_short_input() {
        let short: Vec<User> = users().into_iter().take(2).collect();
        let out = run_push(Demo::ElementAt, short, SalaryRule::Literal).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_group_by_trace_names_stage() {
        let (out, trace) = run_push_traced(Demo::GroupBy, users(), SalaryRule::Literal).unwrap();
        assert_eq!(trace.stage_names, vec!["GROUP_BY"]);
        let names: Vec<&str> = out.iter().map(User::name).collect();
        assert_eq!(names, vec!["Jim", "Dwight"]);
    }

    #[test]
    fn test_map_and_flat_map_wrap_on_overflow() {
        let big = vec![User::new("Kevin", i32::MAX, "Accounting", i32::MAX)];
        let mapped = run_push(Demo::Map, big.clone(), SalaryRule::Literal).unwrap();
        assert_eq!(mapped[0].age, -2);
        let upgraded = run_push(Demo::FlatMap, big, SalaryRule::Corrected).unwrap();
        assert_eq!(upgraded[0].salary, i32::MAX.wrapping_mul(3));
    }
}
