use self::{leaderboard::Leaderboard, retriever::Retriever};
use crate::config::Config;

pub mod leaderboard;
pub mod retriever;

pub struct Services {
    pub leaderboard: Leaderboard,
}

impl Services {
    pub async fn init(config: &Config) -> Self {
        let retriever = Retriever::new(&config.upstream);
        let leaderboard = Leaderboard::new(retriever);

        Self { leaderboard }
    }
}
