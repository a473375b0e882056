//! `hb show`: full detail view of one card.

use clap::Args;
use huntboard_core::model::JobTarget;
use std::io::Write;

use super::{fmt_date, fmt_timestamp, or_dash};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};
use crate::session::{Session, require_target};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Target id. Accepts the full id, the id without `jt_`, or a unique
    /// prefix or suffix.
    pub id: String,
}

pub fn run_show(args: &ShowArgs, output: OutputMode, session: &Session) -> anyhow::Result<()> {
    let board = session.board();
    let target = require_target(&board, &args.id, output)?;
    let column_title = board
        .state()
        .column(target.column_id)
        .map_or_else(|| target.column_id.to_string(), |c| c.title.clone());

    render_mode(output, target, render_text, |t, w| {
        render_pretty(t, &column_title, w)
    })
}

fn render_text(t: &JobTarget, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "id\t{}", t.id)?;
    writeln!(w, "company\t{}", t.company)?;
    writeln!(w, "role\t{}", or_dash(t.role.as_deref()))?;
    writeln!(w, "column\t{}", t.column_id)?;
    writeln!(w, "priority\t{}", t.priority)?;
    writeln!(w, "tags\t{}", t.tags.join(","))?;
    writeln!(w, "warm_up_score\t{}", t.warm_up_score)?;
    writeln!(
        w,
        "next_follow_up\t{}",
        t.next_follow_up_date.map_or_else(|| "-".to_string(), fmt_date)
    )?;
    writeln!(w, "archived\t{}", t.archived)
}

fn render_pretty(t: &JobTarget, column_title: &str, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("{} {}", t.id, t.company))?;
    pretty_kv(w, "role", or_dash(t.role.as_deref()))?;
    pretty_kv(w, "column", column_title)?;
    pretty_kv(w, "priority", t.priority.as_str())?;
    if !t.tags.is_empty() {
        pretty_kv(w, "tags", t.tags.join(", "))?;
    }
    pretty_kv(w, "warm-up score", t.warm_up_score.to_string())?;
    if let Some(reason) = &t.target_reason {
        pretty_kv(w, "reason", reason)?;
    }
    if let Some(source) = &t.source {
        pretty_kv(w, "source", source)?;
    }
    if let Some(stage) = t.interview_stage {
        pretty_kv(w, "interview", stage.as_str())?;
    }
    if let Some(reason) = t.state_reason {
        pretty_kv(w, "state reason", reason.as_str())?;
    }
    if let Some(next) = t.next_follow_up_date {
        pretty_kv(w, "next follow-up", fmt_date(next))?;
    }
    if t.archived {
        pretty_kv(w, "archived", "yes")?;
    }
    pretty_kv(w, "created", fmt_timestamp(t.created_at))?;
    pretty_kv(w, "updated", fmt_timestamp(t.updated_at))?;

    if let Some(notes) = &t.notes {
        writeln!(w)?;
        pretty_section(w, "Notes")?;
        writeln!(w, "{notes}")?;
    }

    if !t.follow_ups.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Follow-ups")?;
        for f in &t.follow_ups {
            let mark = if f.completed { "x" } else { " " };
            writeln!(w, "[{mark}] {} {}  ({})", fmt_date(f.scheduled_date), f.action, f.id)?;
        }
    }

    if !t.outreach_records.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Outreach")?;
        for r in &t.outreach_records {
            let response = r
                .response_date
                .map_or_else(|| "no response".to_string(), |d| format!("replied {}", fmt_date(d)));
            writeln!(
                w,
                "{} {:<22} {:<18} {response}  ({})",
                fmt_date(r.sent_date),
                r.kind.as_str(),
                or_dash(r.contact_person.as_deref()),
                r.id
            )?;
        }
    }

    if !t.warm_up_actions.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Warm-up")?;
        for a in &t.warm_up_actions {
            writeln!(
                w,
                "{} {:<16} +{:<3} {}",
                fmt_date(a.action_date),
                a.kind.as_str(),
                a.impact_score,
                a.description
            )?;
        }
    }

    if !t.key_people.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Key people")?;
        for p in &t.key_people {
            writeln!(w, "{} ({})", p.name, or_dash(p.role.as_deref()))?;
        }
    }
    Ok(())
}
