diesel::table! {
    members (id) {
        id -> Int4,
        name -> Varchar,
        slack_id -> Varchar,
        team_id -> Int4,
    }
}

diesel::table! {
    questions (id) {
        id -> Int4,
        team_id -> Int4,
        text -> Varchar,
        answer -> Jsonb,
    }
}

diesel::table! {
    standups (id) {
        id -> Int4,
        team_id -> Int4,
        member_id -> Int4,
        date -> Timestamp,
        answers -> Jsonb,
    }
}

diesel::table! {
    teams (id) {
        id -> Int4,
        name -> Varchar,
        timezone -> Varchar,
        schedule -> Nullable<Varchar>,
        slack_channel_id -> Nullable<Varchar>,
    }
}

diesel::joinable!(members -> teams (team_id));
diesel::joinable!(questions -> teams (team_id));

diesel::allow_tables_to_appear_in_same_query!(members, questions, standups, teams,);
