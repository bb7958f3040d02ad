use crate::models::{
    Member, NewMember, NewQuestion, NewStandup, NewTeam, Question, Standup, Team,
};
use crate::schema::{members, questions, standups, teams};
use crate::{EventDetails, QuestionSpec};
use chrono::{NaiveDate, NaiveTime};
use diesel::prelude::*;

pub const STANDUP_PROMPT: &str =
    ":wave: Standup time! Post your update for today when you have a minute.";

pub fn challenge(c: String) -> String {
    c
}

pub fn greeting(evt: &EventDetails) -> Option<String> {
    // only reply to humans, replying to bot events would loop us on our own messages
    if evt.bot_id.is_some() || evt.r#type != "message" {
        return None;
    }

    if !evt.text.to_lowercase().contains("hi") {
        return None;
    }

    Some(format!(
        "Hello <@{}>! :wave: How can I help you today?",
        evt.user
    ))
}

pub fn channel_name(team_name: &str) -> String {
    let slug = team_name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");

    format!("team-{}", slug)
}

pub fn create_team(
    conn: &mut PgConnection,
    name: &str,
    timezone: &str,
    schedule: Option<&str>,
) -> QueryResult<Team> {
    diesel::insert_into(teams::table)
        .values(&NewTeam {
            name,
            timezone,
            schedule,
        })
        .get_result(conn)
}

pub fn set_team_channel(conn: &mut PgConnection, team_id: i32, channel: &str) -> QueryResult<Team> {
    diesel::update(teams::table.find(team_id))
        .set(teams::slack_channel_id.eq(channel))
        .get_result(conn)
}

pub fn get_team(conn: &mut PgConnection, team_id: i32) -> QueryResult<Option<Team>> {
    teams::table.find(team_id).first(conn).optional()
}

// returns the deleted team so the caller can clean up its channel
pub fn delete_team(conn: &mut PgConnection, team_id: i32) -> QueryResult<Option<Team>> {
    let team: Option<Team> = teams::table.find(team_id).first(conn).optional()?;

    if team.is_some() {
        diesel::delete(standups::table.filter(standups::team_id.eq(team_id))).execute(conn)?;
        diesel::delete(questions::table.filter(questions::team_id.eq(team_id))).execute(conn)?;
        diesel::delete(members::table.filter(members::team_id.eq(team_id))).execute(conn)?;
        diesel::delete(teams::table.find(team_id)).execute(conn)?;
    }

    Ok(team)
}

pub fn add_member(
    conn: &mut PgConnection,
    team_id: i32,
    name: &str,
    slack_id: &str,
) -> QueryResult<Member> {
    diesel::insert_into(members::table)
        .values(&NewMember {
            name,
            slack_id,
            team_id,
        })
        .get_result(conn)
}

pub fn remove_member(conn: &mut PgConnection, team_id: i32, member_id: i32) -> QueryResult<usize> {
    diesel::delete(
        members::table
            .filter(members::id.eq(member_id))
            .filter(members::team_id.eq(team_id)),
    )
    .execute(conn)
}

// replaces the whole question set for the team
pub fn configure_questions(
    conn: &mut PgConnection,
    team_id: i32,
    specs: &[QuestionSpec],
) -> QueryResult<usize> {
    diesel::delete(questions::table.filter(questions::team_id.eq(team_id))).execute(conn)?;

    let rows: Vec<NewQuestion> = specs
        .iter()
        .map(|q| NewQuestion {
            team_id,
            text: &q.text,
            answer: q.answer.clone(),
        })
        .collect();

    diesel::insert_into(questions::table)
        .values(&rows)
        .execute(conn)
}

pub fn get_questions(conn: &mut PgConnection, team_id: i32) -> QueryResult<Vec<Question>> {
    questions::table
        .filter(questions::team_id.eq(team_id))
        .load(conn)
}

// None means a standup was already submitted today
pub fn submit_standup(
    conn: &mut PgConnection,
    team_id: i32,
    member_id: i32,
    answers: serde_json::Value,
) -> QueryResult<Option<Standup>> {
    let new = NewStandup::new(team_id, member_id, answers);

    let existing: Option<Standup> = standups::table
        .filter(standups::team_id.eq(team_id))
        .filter(standups::member_id.eq(member_id))
        .filter(standups::date.eq(new.date))
        .first(conn)
        .optional()?;

    if existing.is_some() {
        return Ok(None);
    }

    diesel::insert_into(standups::table)
        .values(&new)
        .get_result(conn)
        .map(Some)
}

pub fn query_standups(
    conn: &mut PgConnection,
    team_id: Option<i32>,
    member_id: Option<i32>,
    date: Option<NaiveDate>,
) -> QueryResult<Vec<Standup>> {
    let mut query = standups::table.into_boxed();

    if let Some(team_id) = team_id {
        query = query.filter(standups::team_id.eq(team_id));
    }
    if let Some(member_id) = member_id {
        query = query.filter(standups::member_id.eq(member_id));
    }
    if let Some(date) = date {
        query = query.filter(standups::date.eq(date.and_time(NaiveTime::MIN)));
    }

    query.order(standups::date.desc()).load(conn)
}

pub fn team_standups(conn: &mut PgConnection, team_id: i32) -> QueryResult<Vec<Standup>> {
    standups::table
        .filter(standups::team_id.eq(team_id))
        .order(standups::date.desc())
        .load(conn)
}
