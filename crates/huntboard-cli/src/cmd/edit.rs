//! `hb edit`: patch fields of an existing card.

use chrono::{SubsecRound, Utc};
use clap::Args;
use huntboard_core::ErrorCode;
use huntboard_core::model::{
    Attachment, AttachmentType, ColumnId, InterviewStage, JobTargetPatch, KeyPerson, Priority,
    Signal, SignalType, StateReason,
};
use uuid::Uuid;

use crate::output::{CliError, OutputMode, render_error, render_success, report};
use crate::session::{Session, commit, require_target};

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Target id (full, without `jt_`, or a unique prefix/suffix).
    pub id: String,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long, conflicts_with = "clear_role")]
    pub role: Option<String>,

    #[arg(long)]
    pub clear_role: bool,

    /// Why this company is worth targeting.
    #[arg(long)]
    pub reason: Option<String>,

    #[arg(long)]
    pub source: Option<String>,

    #[arg(long)]
    pub column: Option<ColumnId>,

    #[arg(short, long)]
    pub priority: Option<Priority>,

    /// Replace the card's tags (repeatable).
    #[arg(short, long = "tag", conflicts_with = "clear_tags")]
    pub tags: Vec<String>,

    /// Remove every tag from the card.
    #[arg(long)]
    pub clear_tags: bool,

    #[arg(long, conflicts_with = "clear_notes")]
    pub notes: Option<String>,

    #[arg(long)]
    pub clear_notes: bool,

    /// Interview stage: screening, technical, team-interview,
    /// hiring-manager, final-round or offer-pending.
    #[arg(long)]
    pub stage: Option<InterviewStage>,

    #[arg(long)]
    pub interview_notes: Option<String>,

    /// Why the card sits where it does (e.g. no-response, role-frozen).
    #[arg(long, conflicts_with = "clear_state_reason")]
    pub state_reason: Option<StateReason>,

    #[arg(long)]
    pub clear_state_reason: bool,

    /// Override the warm-up score (0-100).
    #[arg(long)]
    pub warm_up_score: Option<u8>,

    /// Add a key person, as `NAME` or `NAME=ROLE` (repeatable).
    #[arg(long = "person")]
    pub people: Vec<String>,

    /// Record a signal observed today (repeatable).
    #[arg(long = "signal")]
    pub signals: Vec<SignalType>,

    /// Attach a link (repeatable).
    #[arg(long = "link")]
    pub links: Vec<String>,
}

pub fn run_edit(args: EditArgs, output: OutputMode, session: &Session) -> anyhow::Result<()> {
    let mut board = session.board();
    let current = require_target(&board, &args.id, output)?.clone();

    let now = Utc::now().trunc_subsecs(3);
    let mut patch = JobTargetPatch {
        company: args.company.map(|c| c.trim().to_string()),
        role: if args.clear_role {
            Some(None)
        } else {
            args.role.map(Some)
        },
        target_reason: args.reason.map(Some),
        source: args.source.map(Some),
        column_id: args.column,
        priority: args.priority,
        tags: if args.clear_tags {
            Some(Vec::new())
        } else if args.tags.is_empty() {
            None
        } else {
            Some(args.tags)
        },
        warm_up_score: args.warm_up_score,
        interview_stage: args.stage.map(Some),
        interview_notes: args.interview_notes.map(Some),
        notes: if args.clear_notes {
            Some(None)
        } else {
            args.notes.map(Some)
        },
        state_reason: if args.clear_state_reason {
            Some(None)
        } else {
            args.state_reason.map(Some)
        },
        ..JobTargetPatch::default()
    };

    if !args.people.is_empty() {
        let mut people = current.key_people.clone();
        people.extend(args.people.iter().map(String::as_str).map(parse_person));
        patch.key_people = Some(people);
    }
    if !args.signals.is_empty() {
        let mut signals = current.signals.clone();
        signals.extend(args.signals.iter().map(|&kind| Signal {
            kind,
            date: now,
            description: None,
        }));
        patch.signals = Some(signals);
    }
    if !args.links.is_empty() {
        let mut attachments = current.attachments.clone();
        attachments.extend(args.links.into_iter().map(|url| Attachment {
            id: Uuid::new_v4(),
            name: url.clone(),
            kind: AttachmentType::Url,
            url,
            uploaded_at: now,
        }));
        patch.attachments = Some(attachments);
    }

    if patch.is_empty() {
        let message = "nothing to change";
        render_error(
            output,
            &CliError::with_details(
                message,
                "Pass at least one field flag, e.g. --priority high",
                ErrorCode::ValidationFailed.code(),
            ),
        )?;
        anyhow::bail!(message);
    }

    board
        .update_job_target(&current.id, patch)
        .map_err(|err| report(output, err))?;
    commit(&mut board, output)?;
    render_success(output, &format!("Updated {}", current.id))
}

fn parse_person(raw: &str) -> KeyPerson {
    let (name, role) = match raw.split_once('=') {
        Some((name, role)) => (name.trim(), Some(role.trim().to_string())),
        None => (raw.trim(), None),
    };
    KeyPerson {
        name: name.to_string(),
        role: role.filter(|r| !r.is_empty()),
        linked_in_url: None,
        notes: None,
    }
}
