use crate::{ProblemError, StripsProblem};

const ROOMS: [&str; 2] = ["rooma", "roomb"];
const GRIPPERS: [&str; 2] = ["left", "right"];

/// A robot with two grippers has to carry every ball from `rooma` to `roomb`.
pub fn problem(number_of_balls: usize) -> Result<StripsProblem, ProblemError> {
    let balls = (0..number_of_balls)
        .map(|i| format!("ball{}", i))
        .collect::<Vec<_>>();

    let mut builder = StripsProblem::builder();
    for room in &ROOMS {
        builder.fact(at_robby(room));
    }
    for gripper in &GRIPPERS {
        builder.fact(free(gripper));
    }
    for ball in &balls {
        for room in &ROOMS {
            builder.fact(at(ball, room));
        }
        for gripper in &GRIPPERS {
            builder.fact(carry(ball, gripper));
        }
    }

    for from in &ROOMS {
        for to in &ROOMS {
            if from == to {
                continue;
            }

            builder.action(
                format!("move-{}-{}", from, to),
                &[at_robby(from).as_str()],
                &[at_robby(to).as_str()],
                &[at_robby(from).as_str()],
            );
        }
    }

    for ball in &balls {
        for room in &ROOMS {
            for gripper in &GRIPPERS {
                builder.action(
                    format!("pick-{}-{}-{}", ball, room, gripper),
                    &[
                        at(ball, room).as_str(),
                        at_robby(room).as_str(),
                        free(gripper).as_str(),
                    ],
                    &[carry(ball, gripper).as_str()],
                    &[at(ball, room).as_str(), free(gripper).as_str()],
                );
                builder.action(
                    format!("drop-{}-{}-{}", ball, room, gripper),
                    &[carry(ball, gripper).as_str(), at_robby(room).as_str()],
                    &[at(ball, room).as_str(), free(gripper).as_str()],
                    &[carry(ball, gripper).as_str()],
                );
            }
        }
    }

    builder.initially(at_robby(ROOMS[0]));
    for gripper in &GRIPPERS {
        builder.initially(free(gripper));
    }
    for ball in &balls {
        builder.initially(at(ball, ROOMS[0]));
        builder.goal(at(ball, ROOMS[1]));
    }

    builder.build()
}

fn at_robby(room: &str) -> String {
    format!("at-robby-{}", room)
}

fn at(ball: &str, room: &str) -> String {
    format!("at-{}-{}", ball, room)
}

fn free(gripper: &str) -> String {
    format!("free-{}", gripper)
}

fn carry(ball: &str, gripper: &str) -> String {
    format!("carry-{}-{}", ball, gripper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActionId, PlanningProblem};

    fn action_named(problem: &StripsProblem, name: &str) -> ActionId {
        let index = problem
            .actions()
            .iter()
            .position(|a| a.name() == name)
            .unwrap_or_else(|| panic!("no action named '{}'", name));
        ActionId(index)
    }

    #[test]
    fn grounds_every_move_pick_and_drop() {
        let problem = problem(2).expect("valid problem");

        // 2 moves, plus pick and drop for 2 balls x 2 rooms x 2 grippers.
        assert_eq!(problem.actions().len(), 2 + 2 * 2 * 2 * 2);
        assert_eq!(problem.facts().len(), 2 + 2 + 2 * (2 + 2));
        assert_eq!(problem.goal().len(), 2);
    }

    #[test]
    fn carrying_a_ball_across_reaches_the_goal() {
        let problem = problem(1).expect("valid problem");

        let mut state = problem.initial_state();
        assert!(!problem.is_goal(&state));
        for name in &["pick-ball0-rooma-left", "move-rooma-roomb", "drop-ball0-roomb-left"] {
            let action = action_named(&problem, name);
            assert!(problem.applicable_actions(&state).contains(&action), "{} applicable", name);
            state = problem.apply_action(&state, action);
        }

        assert!(problem.is_goal(&state));
    }

    #[test]
    fn initially_only_picks_in_rooma_and_moving_are_applicable() {
        let problem = problem(1).expect("valid problem");

        let mut applicable = problem
            .applicable_actions(&problem.initial_state())
            .into_iter()
            .map(|a| problem.action_name(a).to_string())
            .collect::<Vec<_>>();
        applicable.sort();

        assert_eq!(
            applicable,
            vec!["move-rooma-roomb", "pick-ball0-rooma-left", "pick-ball0-rooma-right"]
        );
    }
}
