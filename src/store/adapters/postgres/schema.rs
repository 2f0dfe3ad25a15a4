//! Diesel schema for record store persistence.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Store-assigned identifier.
        id -> Int8,
        /// Unique user name.
        #[max_length = 64]
        name -> Varchar,
        /// Display name.
        #[max_length = 64]
        display_name -> Varchar,
    }
}

diesel::table! {
    /// Teams.
    teams (id) {
        /// Store-assigned identifier.
        id -> Int8,
        /// Unique team name.
        #[max_length = 64]
        name -> Varchar,
        /// Team description.
        #[max_length = 128]
        description -> Varchar,
        /// Administering user.
        admin_id -> Int8,
        /// Creation timestamp.
        creation_time -> Timestamptz,
    }
}

diesel::table! {
    /// Team membership pairs.
    team_members (team_id, user_id) {
        /// Team side of the pair.
        team_id -> Int8,
        /// User side of the pair.
        user_id -> Int8,
    }
}

diesel::table! {
    /// Project boards.
    project_boards (id) {
        /// Store-assigned identifier.
        id -> Int8,
        /// Board name, unique within the team.
        #[max_length = 64]
        name -> Varchar,
        /// Board description.
        #[max_length = 128]
        description -> Varchar,
        /// Owning team.
        team_id -> Int8,
        /// Board status (`OPEN` or `CLOSED`).
        #[max_length = 16]
        status -> Varchar,
        /// Creation timestamp.
        creation_time -> Timestamptz,
        /// Closure timestamp.
        end_time -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Tasks on project boards.
    tasks (id) {
        /// Store-assigned identifier.
        id -> Int8,
        /// Task title, unique within the board.
        #[max_length = 64]
        title -> Varchar,
        /// Task description.
        #[max_length = 128]
        description -> Varchar,
        /// Owning board.
        board_id -> Int8,
        /// Assigned user.
        user_id -> Int8,
        /// Task status.
        #[max_length = 16]
        status -> Varchar,
        /// Creation timestamp.
        creation_time -> Timestamptz,
    }
}

diesel::joinable!(team_members -> teams (team_id));
diesel::joinable!(tasks -> project_boards (board_id));
diesel::allow_tables_to_appear_in_same_query!(users, teams, team_members, project_boards, tasks);

/// Idempotent bootstrap statements for the tables above.
pub const CREATE_TABLES: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    name VARCHAR(64) NOT NULL,
    display_name VARCHAR(64) NOT NULL,
    CONSTRAINT users_name_key UNIQUE (name)
);
CREATE TABLE IF NOT EXISTS teams (
    id BIGSERIAL PRIMARY KEY,
    name VARCHAR(64) NOT NULL,
    description VARCHAR(128) NOT NULL,
    admin_id BIGINT NOT NULL REFERENCES users (id),
    creation_time TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT teams_name_key UNIQUE (name)
);
CREATE TABLE IF NOT EXISTS team_members (
    team_id BIGINT NOT NULL REFERENCES teams (id),
    user_id BIGINT NOT NULL REFERENCES users (id),
    PRIMARY KEY (team_id, user_id)
);
CREATE TABLE IF NOT EXISTS project_boards (
    id BIGSERIAL PRIMARY KEY,
    name VARCHAR(64) NOT NULL,
    description VARCHAR(128) NOT NULL,
    team_id BIGINT NOT NULL REFERENCES teams (id),
    status VARCHAR(16) NOT NULL DEFAULT 'OPEN',
    creation_time TIMESTAMPTZ NOT NULL,
    end_time TIMESTAMPTZ,
    CONSTRAINT project_boards_team_name_key UNIQUE (team_id, name)
);
CREATE TABLE IF NOT EXISTS tasks (
    id BIGSERIAL PRIMARY KEY,
    title VARCHAR(64) NOT NULL,
    description VARCHAR(128) NOT NULL,
    board_id BIGINT NOT NULL REFERENCES project_boards (id),
    user_id BIGINT NOT NULL REFERENCES users (id),
    status VARCHAR(16) NOT NULL DEFAULT 'OPEN',
    creation_time TIMESTAMPTZ NOT NULL,
    CONSTRAINT tasks_board_title_key UNIQUE (board_id, title)
);
";
