//! `hb outreach`: log outreach attempts and their responses.

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use huntboard_core::HuntError;
use huntboard_core::model::{OutreachRecord, OutreachType};
use serde::Serialize;
use std::io::Write;
use uuid::Uuid;

use crate::output::{OutputMode, render, render_success, report};
use crate::resolve::{parse_when, resolve_record_id};
use crate::session::{Session, commit, require_target};

#[derive(Args, Debug)]
pub struct OutreachArgs {
    #[command(subcommand)]
    pub command: OutreachCommand,
}

#[derive(Subcommand, Debug)]
pub enum OutreachCommand {
    #[command(about = "Log an outreach attempt")]
    Add(OutreachAddArgs),

    #[command(about = "Record that an outreach attempt got a reply")]
    Respond(OutreachRespondArgs),
}

#[derive(Args, Debug)]
pub struct OutreachAddArgs {
    /// Target id.
    pub id: String,

    /// Channel: dm, email, referral-request, recruiter-contact,
    /// application-submitted, cold-call or networking-event.
    #[arg(long = "type", default_value = "email")]
    pub kind: OutreachType,

    /// Who was contacted.
    #[arg(long)]
    pub contact: Option<String>,

    /// Name of the message template used.
    #[arg(long)]
    pub template: Option<String>,

    /// Name of the person who referred you. Marks the attempt as referred.
    #[arg(long)]
    pub referrer: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    /// When it was sent.
    #[arg(long, value_parser = parse_when, default_value = "now")]
    pub sent: DateTime<Utc>,
}

#[derive(Args, Debug)]
pub struct OutreachRespondArgs {
    /// Target id.
    pub id: String,

    /// Outreach record id, or a unique prefix of it.
    pub outreach: String,

    /// When the reply arrived. Defaults to now.
    #[arg(long, value_parser = parse_when)]
    pub on: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct OutreachAddOutput {
    target_id: String,
    id: Uuid,
    kind: OutreachType,
}

pub fn run_outreach(
    args: OutreachArgs,
    output: OutputMode,
    session: &Session,
) -> anyhow::Result<()> {
    match args.command {
        OutreachCommand::Add(add) => run_add(add, output, session),
        OutreachCommand::Respond(respond) => run_respond(respond, output, session),
    }
}

fn run_add(args: OutreachAddArgs, output: OutputMode, session: &Session) -> anyhow::Result<()> {
    let mut board = session.board();
    let target_id = require_target(&board, &args.id, output)?.id.clone();

    let mut record = OutreachRecord::new(args.kind, args.sent);
    record.contact_person = args.contact;
    record.message_template = args.template;
    record.has_referral = args.referrer.is_some();
    record.referrer_name = args.referrer;
    record.notes = args.notes;

    let id = board
        .log_outreach(&target_id, record)
        .map_err(|err| report(output, err))?;
    commit(&mut board, output)?;

    let result = OutreachAddOutput {
        target_id,
        id,
        kind: args.kind,
    };
    render(output, &result, |r, w| {
        writeln!(w, "Logged {} outreach {} for {}", r.kind, r.id, r.target_id)
    })
}

fn run_respond(
    args: OutreachRespondArgs,
    output: OutputMode,
    session: &Session,
) -> anyhow::Result<()> {
    let mut board = session.board();
    let target = require_target(&board, &args.id, output)?;
    let target_id = target.id.clone();

    let Some(outreach_id) =
        resolve_record_id(target.outreach_records.iter().map(|r| r.id), &args.outreach)
    else {
        return Err(report(
            output,
            HuntError::OutreachNotFound {
                target_id,
                id: args.outreach,
            },
        ));
    };

    board
        .record_outreach_response(&target_id, outreach_id, args.on)
        .map_err(|err| report(output, err))?;
    commit(&mut board, output)?;
    render_success(output, &format!("Recorded response to {outreach_id}"))
}
