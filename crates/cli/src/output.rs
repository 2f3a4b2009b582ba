// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text formatting for jobset listings and build/step rows.

use crate::color::{self, Counter};
use crate::tree::TreeNode;
use hy_core::{
    display_drv_path, format_timestamp, interpret_build, Build, BuildStep, JobsetStatus, Links,
};
use hy_engine::{EnrichedBuild, JobsetJobs};

/// Column the row numbers right-align to, measured from the tree root.
const START_OF_LINE: usize = 5;
const NUMBER_WIDTH: usize = 5;
const LABEL_WIDTH: usize = 120;
/// Display width of a status icon.
const ICON_WIDTH: usize = 2;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

fn counter_text(n: u64) -> String {
    if n == 0 {
        "-".to_string()
    } else {
        n.to_string()
    }
}

/// One line of `jobset list`.
pub fn format_jobset_row(job: &JobsetStatus, colorize: bool) -> String {
    let status = job.interpret();
    let ts = format_timestamp(job.last_checked.unwrap_or(0));
    format!(
        "{}  {:<80}{:<20} {} {} {} / {} -> {}",
        status.icon,
        job.name,
        ts,
        color::counter(Counter::Succeeded, &counter_text(job.succeeded), colorize),
        color::counter(Counter::Failed, &counter_text(job.failed), colorize),
        color::counter(Counter::Scheduled, &counter_text(job.scheduled), colorize),
        job.total,
        status.label,
    )
}

/// Jobset listing sorted by name, or the empty-project notice.
pub fn format_jobset_list(project: &str, mut jobs: Vec<JobsetStatus>, colorize: bool) -> String {
    if jobs.is_empty() {
        return format!("No jobsets in {}.", project);
    }
    jobs.sort_by(|a, b| a.name.cmp(&b.name));
    jobs.iter().map(|j| format_jobset_row(j, colorize)).collect::<Vec<_>>().join("\n")
}

fn fit_label(text: &str) -> String {
    if text.chars().count() <= LABEL_WIDTH {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(LABEL_WIDTH - 1).collect();
    cut.push('…');
    cut
}

/// Icon, right-aligned number, label and optional trailing status.
///
/// `alignment_offset` pads between icon and number so numbers line up at
/// every tree depth. Extra label lines continue under the label column.
pub fn format_row(
    icon: &str,
    number: &str,
    text: &str,
    status: Option<&str>,
    alignment_offset: usize,
) -> String {
    let mut lines = text.split('\n');
    let first = fit_label(lines.next().unwrap_or_default());
    let lead = " ".repeat(alignment_offset);
    let mut row = match status {
        Some(status) => format!(
            "{icon}{lead}{number:>width$} {first:<label$}{status}",
            width = NUMBER_WIDTH,
            label = LABEL_WIDTH
        ),
        None => format!("{icon}{lead}{number:>width$} {first}", width = NUMBER_WIDTH),
    };
    let indent = " ".repeat(ICON_WIDTH + alignment_offset + NUMBER_WIDTH + 1);
    for line in lines {
        row.push('\n');
        row.push_str(&indent);
        row.push_str(&fit_label(line));
    }
    row
}

fn alignment_for(parent: &TreeNode) -> usize {
    START_OF_LINE.saturating_sub(parent.width())
}

pub fn format_build_row(build: &Build, alignment_offset: usize, with_status: bool) -> String {
    let status = build.interpret();
    format_row(
        status.icon,
        &build.id.to_string(),
        &build.nixname,
        with_status.then_some(status.label),
        alignment_offset,
    )
}

/// Step row; failed steps carry the log link, preferring propagated logs.
pub fn format_step_row(
    step: &BuildStep,
    enriched: Option<&EnrichedBuild>,
    links: &Links,
    alignment_offset: usize,
) -> String {
    let status = step.interpret();
    let mut text = display_drv_path(&step.drv_path).to_string();
    if status.is_failed() {
        let propagated = enriched
            .and_then(|b| b.link_for(step.step_nr))
            .filter(|link| !link.matching_steps.is_empty());
        match propagated {
            Some(link) => {
                for matched in &link.matching_steps {
                    text.push_str(&format!(
                        "\nPropagated log can be found at 🗒️  {}",
                        links.step_log(matched.build_id, matched.step_nr)
                    ));
                }
                if link.matching_steps.len() > 1 {
                    text.push_str(
                        "\nMultiple logs matched the failing derivation name, click the failing build for certainty.",
                    );
                }
            }
            None => text.push_str(&format!(
                "\nLog can be found at 🗒️  {}",
                links.step_log(step.build_id, step.step_nr)
            )),
        }
    }
    format_row(status.icon, &step.step_nr.to_string(), &text, Some(status.label), alignment_offset)
}

/// Add the steps of `build` under `node`, optionally folding successes into one row.
pub fn add_steps(node: &mut TreeNode, build: &EnrichedBuild, links: &Links, summarize: bool) {
    let offset = alignment_for(node);
    let steps = &build.build.steps;
    if summarize {
        let successful = steps.iter().filter(|s| s.interpret().is_succeeded()).count();
        if successful > 0 {
            let status = interpret_build(Some(0));
            let text = format!("{} successfully completed", successful);
            node.add(format_row(status.icon, "", &text, Some(status.label), offset));
        }
    }
    for step in steps {
        if summarize && step.interpret().is_succeeded() {
            continue;
        }
        node.add(format_step_row(step, Some(build), links, offset));
    }
}

/// Evaluation trees for every evaluation of a jobset, stamped with `now`.
pub fn jobset_trees(jobs: &JobsetJobs, links: &Links, now: i64) -> Vec<TreeNode> {
    jobs.evals
        .iter()
        .map(|eval| {
            let mut root =
                TreeNode::new(format!("Evaluation #{} at {}", eval.id, format_timestamp(now)));
            let offset = alignment_for(&root);
            for build in jobs.builds_of(eval) {
                let node = root.add(format_build_row(&build.build, offset, true));
                add_steps(node, build, links, true);
            }
            root
        })
        .collect()
}

/// Full text for `jobset jobs` and monitor progress, newline terminated.
pub fn format_jobset_jobs(
    project: &str,
    jobset: &str,
    jobs: Option<&JobsetJobs>,
    links: &Links,
    now: i64,
) -> String {
    match jobs {
        None => format!("No evals in {}/{}, job not picked up yet?\n", project, jobset),
        Some(jobs) => jobset_trees(jobs, links, now)
            .iter()
            .map(TreeNode::render)
            .collect::<Vec<_>>()
            .join(""),
    }
}

/// Tree for `build <id> info`: the build row with every step.
pub fn build_info_tree(build: &EnrichedBuild, links: &Links) -> TreeNode {
    let mut root = TreeNode::new(format_build_row(&build.build, 0, true));
    add_steps(&mut root, build, links, false);
    root
}
