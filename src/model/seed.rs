//! Fixed fallback dataset used when no persisted snapshot exists

use super::types::{Comment, Creator, ModerationStatus, Video, VideoStats, Viewer};

fn creator(id: &str, name: &str, subscribers: &str, verified: bool) -> Creator {
    Creator {
        id: id.to_string(),
        name: name.to_string(),
        avatar: format!("https://i.pravatar.cc/150?u={}", id),
        subscribers: subscribers.to_string(),
        verified,
    }
}

#[allow(clippy::too_many_arguments)]
fn video(
    id: &str,
    video_url: Option<&str>,
    embed_url: Option<&str>,
    title: &str,
    description: &str,
    duration: &str,
    upload_date: &str,
    category: &str,
    hashtags: &[&str],
    creator: Creator,
    stats: VideoStats,
) -> Video {
    Video {
        id: id.to_string(),
        video_url: video_url.map(str::to_string),
        embed_url: embed_url.map(str::to_string),
        title: title.to_string(),
        description: description.to_string(),
        thumbnail: format!("https://picsum.photos/seed/{}/640/360", id),
        duration: duration.to_string(),
        upload_date: upload_date.to_string(),
        category: category.to_string(),
        hashtags: hashtags.iter().map(|h| h.to_string()).collect(),
        creator,
        stats,
        status: ModerationStatus::Approved,
        is_short: false,
    }
}

fn stats(views: u64, likes: u64, dislikes: u64, comments: u64, shares: u64) -> VideoStats {
    VideoStats { views, likes, dislikes, comments, shares }
}

/// The seeded video list, in catalog order.
pub fn seed_videos() -> Vec<Video> {
    let mut short = video(
        "s1",
        Some("https://media.wetube.app/shorts/s1.mp4"),
        None,
        "60 seconds of tap dance",
        "Quick footwork drill from rehearsal.",
        "0:58",
        "1 day ago",
        "Dance",
        &["#shorts", "#tapdance"],
        creator("creator4", "Lena Moves", "340K", false),
        stats(98_000, 7_400, 35, 4, 210),
    );
    short.is_short = true;

    let mut pending = video(
        "v6",
        Some("https://media.wetube.app/videos/v6.mp4"),
        None,
        "Unreleased demo reel",
        "Waiting for moderation.",
        "3:12",
        "just now",
        "Film",
        &[],
        creator("creator2", "Studio Nine", "89K", false),
        stats(0, 0, 0, 4, 0),
    );
    pending.status = ModerationStatus::Pending;

    vec![
        video(
            "v1",
            Some("https://media.wetube.app/videos/v1.mp4"),
            None,
            "Behind the scenes: building a live music set",
            "We spent three weeks rebuilding our live rig from scratch. This video walks \
             through the signal chain, the looper setup and the mistakes we made on the way \
             to the first show.",
            "12:34",
            "2 days ago",
            "Music",
            &["#livemusic", "#gear", "#behindthescenes"],
            creator("creator1", "The Night Owls", "1.2M", true),
            stats(1_250_000, 25_000, 100, 4, 830),
        ),
        video(
            "v2",
            None,
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            "Portrait lighting with a single softbox",
            "A one-light setup for moody portraits, recorded during a studio session.",
            "8:05",
            "1 week ago",
            "Photography",
            &["#lighting", "#portrait"],
            creator("creator2", "Studio Nine", "89K", false),
            stats(54_300, 3_100, 42, 4, 120),
        ),
        video(
            "v3",
            Some("https://media.wetube.app/videos/v3.mp4"),
            Some("https://www.youtube.com/embed/ScMzIvxBSi4"),
            "Street art tour: Lisbon",
            "Walking the Graça neighbourhood with three local muralists.",
            "21:47",
            "3 weeks ago",
            "Travel",
            &["#streetart", "#lisbon"],
            creator("creator3", "Wander Ink", "512K", true),
            stats(310_000, 18_200, 260, 4, 1_900),
        ),
        video(
            "v4",
            Some("https://media.wetube.app/videos/v4.mp4"),
            None,
            "Casting call tips from a working director",
            "What we look for in a self-tape, and what makes us stop watching.",
            "1:02:03",
            "1 month ago",
            "Film",
            &["#acting", "#casting"],
            creator("creator2", "Studio Nine", "89K", false),
            stats(87_000, 6_400, 75, 4, 540),
        ),
        video(
            "v5",
            Some("https://media.wetube.app/videos/v5.mp4"),
            None,
            "Speedrunning the new platformer",
            "Any% attempt with commentary.",
            "34:10",
            "5 hours ago",
            "Gaming",
            &["#speedrun"],
            creator("creator5", "Pixel Rush", "2.4M", true),
            stats(12_400, 900, 12, 4, 33),
        ),
        short,
        pending,
    ]
}

fn comment(id: &str, name: &str, text: &str, timestamp: &str, likes: u64, replies: Vec<Comment>) -> Comment {
    Comment {
        id: id.to_string(),
        author: Viewer {
            name: name.to_string(),
            avatar: format!("https://i.pravatar.cc/150?u={}", name.to_lowercase().replace(' ', "")),
        },
        text: text.to_string(),
        timestamp: timestamp.to_string(),
        created_at: None,
        likes,
        replies,
    }
}

/// Shared comment set every video thread starts from.
pub fn seed_comments() -> Vec<Comment> {
    vec![
        comment(
            "c1",
            "Maya Chen",
            "The looper section was exactly what I needed, thanks!",
            "1 day ago",
            245,
            vec![comment("c1r1", "The Night Owls", "Glad it helped!", "1 day ago", 31, vec![])],
        ),
        comment("c2", "Diego Ramos", "What interface are you using for the vocals?", "2 days ago", 87, vec![]),
        comment("c3", "Priya Nair", "Production quality keeps getting better.", "3 days ago", 56, vec![]),
        comment("c4", "Tom Becker", "First!", "4 days ago", 2, vec![]),
    ]
}
