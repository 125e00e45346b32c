// Video list demo
// A fixed catalogue that "arrives" after a delay, a title/channel search and a likes counter

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub title: String,
    pub channel: String,
    /// Display string such as "1.2M"
    pub views: String,
    pub thumbnail: String,
}

fn video(title: &str, channel: &str, views: &str, thumbnail_id: &str) -> Video {
    Video {
        title: title.to_string(),
        channel: channel.to_string(),
        views: views.to_string(),
        thumbnail: format!("https://i.ytimg.com/vi/{}/maxresdefault.jpg", thumbnail_id),
    }
}

pub fn demo_videos() -> Vec<Video> {
    vec![
        video("Vue 3 Crash Course", "CodeAcademy", "1.2M", "YrxBCBibVo0"),
        video("Learn JavaScript in 1 Hour", "Tech Simplified", "980K", "W6NZfCO5SIk"),
        video("Master CSS Animations", "Frontend Fun", "450K", "jgw82b5Y2MU"),
        video("Build a Portfolio with HTML & CSS", "DesignSpot", "230K", "xpZLS6b0L4w"),
        video("Python for Beginners – Full Course", "Tech With Tim", "2.4M", "_uQrJ0TkZlc"),
        video("The Secret to Perfect UI Design", "DesignCourse", "740K", "_Hp_dI0DzY4"),
        video("Top 10 JavaScript Tricks You Must Know", "Fireship", "1.9M", "2Ji-clqUYnA"),
        video("Relaxing Lofi Beats – Study Music", "Lofi Girl", "3.8M", "jfKfPfyJRdk"),
        video("Build a Fullstack App with Django & Vue", "Traversy Media", "620K", "qDwdMDQ8oX4"),
        video("How the Internet Works – Explained!", "Computerphile", "870K", "ewrBalT_eBM"),
    ]
}

pub struct VideoLibrary {
    videos: Vec<Video>,
    query: String,
    total_likes: u64,
    loading: bool,
    delay: Duration,
}

impl VideoLibrary {
    /// A library that starts out loading; call `load` to populate it
    pub fn new(delay: Duration) -> Self {
        VideoLibrary {
            videos: Vec::new(),
            query: String::new(),
            total_likes: 0,
            loading: true,
            delay,
        }
    }

    pub async fn load(&mut self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.videos = demo_videos();
        self.loading = false;
        log::debug!("Loaded {} videos", self.videos.len());
    }

    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        log::debug!("Searching: {}", self.query);
    }

    /// Videos whose title or channel contains the query, ignoring case
    pub fn filtered(&self) -> Vec<&Video> {
        let query = self.query.to_lowercase();
        self.videos
            .iter()
            .filter(|v| {
                v.title.to_lowercase().contains(&query) || v.channel.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn add_like(&mut self) {
        self.total_likes += 1;
    }

    pub fn total_likes(&self) -> u64 {
        self.total_likes
    }
}
