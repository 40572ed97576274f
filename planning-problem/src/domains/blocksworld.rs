use crate::{ProblemError, StripsProblem};

/// Four-operator blocksworld. Blocks start stacked as a single tower with
/// `block0` on the table and must be restacked as the reversed tower.
pub fn reverse_tower(number_of_blocks: usize) -> Result<StripsProblem, ProblemError> {
    let blocks = (0..number_of_blocks)
        .map(|i| format!("block{}", i))
        .collect::<Vec<_>>();

    let mut builder = StripsProblem::builder();
    builder.fact("handempty");
    for block in &blocks {
        builder
            .fact(clear(block))
            .fact(on_table(block))
            .fact(holding(block));
        for other in &blocks {
            if block != other {
                builder.fact(on(block, other));
            }
        }
    }

    for block in &blocks {
        builder.action(
            format!("pick-up-{}", block),
            &[clear(block).as_str(), on_table(block).as_str(), "handempty"],
            &[holding(block).as_str()],
            &[clear(block).as_str(), on_table(block).as_str(), "handempty"],
        );
        builder.action(
            format!("put-down-{}", block),
            &[holding(block).as_str()],
            &[clear(block).as_str(), on_table(block).as_str(), "handempty"],
            &[holding(block).as_str()],
        );

        for other in &blocks {
            if block == other {
                continue;
            }

            builder.action(
                format!("stack-{}-{}", block, other),
                &[holding(block).as_str(), clear(other).as_str()],
                &[on(block, other).as_str(), clear(block).as_str(), "handempty"],
                &[holding(block).as_str(), clear(other).as_str()],
            );
            builder.action(
                format!("unstack-{}-{}", block, other),
                &[on(block, other).as_str(), clear(block).as_str(), "handempty"],
                &[holding(block).as_str(), clear(other).as_str()],
                &[on(block, other).as_str(), clear(block).as_str(), "handempty"],
            );
        }
    }

    builder.initially("handempty");
    if let (Some(bottom), Some(top)) = (blocks.first(), blocks.last()) {
        builder.initially(on_table(bottom)).initially(clear(top));
    }
    for pair in blocks.windows(2) {
        builder.initially(on(&pair[1], &pair[0]));
        builder.goal(on(&pair[0], &pair[1]));
    }
    if let Some(bottom) = blocks.last() {
        builder.goal(on_table(bottom));
    }

    builder.build()
}

fn clear(block: &str) -> String {
    format!("clear-{}", block)
}

fn on_table(block: &str) -> String {
    format!("ontable-{}", block)
}

fn holding(block: &str) -> String {
    format!("holding-{}", block)
}

fn on(block: &str, below: &str) -> String {
    format!("on-{}-{}", block, below)
}
