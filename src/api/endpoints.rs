// API endpoint definitions and URL builders
// Endpoints are handled directly in client.rs for this implementation

#[allow(dead_code)]
pub const ACCOUNT_ENDPOINT: &str = "https://americas.api.riotgames.com/riot/account/v1/accounts/by-riot-id";
#[allow(dead_code)]
pub const MATCH_IDS_ENDPOINT: &str = "https://{region}.api.riotgames.com/lol/match/v5/matches/by-puuid";
#[allow(dead_code)]
pub const MATCH_ENDPOINT: &str = "https://{region}.api.riotgames.com/lol/match/v5/matches";
#[allow(dead_code)]
pub const TIMELINE_ENDPOINT: &str = "https://{region}.api.riotgames.com/lol/match/v5/matches/{matchId}/timeline";
