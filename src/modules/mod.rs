pub mod models {
    pub mod circuit;
    pub mod team;
    pub mod driver;
    pub mod race;
    pub mod season;

    pub mod archive;
}

pub mod helpers {
    pub mod general;
    pub mod lap_time;
    pub mod points;
    pub mod standings;

    pub mod config;
    pub mod logging;
}

pub mod questions {
    pub mod question;
    pub mod predicates;
    pub mod catalogue;
    pub mod answers;
}

pub mod puzzle {
    pub mod solver;
    pub mod constructor;
    pub mod session;
}
