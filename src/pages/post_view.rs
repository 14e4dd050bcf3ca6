use crate::models::post::FullPost;
use crate::slug::profile_path;
use chrono::{DateTime, Utc};
use maud::{Markup, html};

/// One entry of a feed. The wrapper carries the post id as its key.
pub fn post_view(full: &FullPost, now: DateTime<Utc>) -> Markup {
    let FullPost { post, author } = full;
    let handle = author.handle().unwrap_or_default();

    html! {
        div class="post" data-key=(post.id.as_str()) {
            img class="post-avatar" src=(author.profile_image_url)
                alt=(format!("@{handle}'s profile picture")) width="56" height="56";
            div class="post-body" {
                div class="post-meta" {
                    a href=(profile_path(handle)) { span { "@" (handle) } }
                    a href=(format!("/post/{}", post.id)) {
                        span class="post-time" { " · " (relative_time(post.created_at, now)) }
                    }
                }
                span class="post-content" { (post.content) }
            }
        }
    }
}

/// Human "time ago" label, e.g. `3 hours ago`.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds().max(0) as f64;
    let mins = (secs / 60.0).round();
    let hours = (secs / 3600.0).round();
    let days = (secs / 86_400.0).round();

    if secs < 45.0 {
        "a few seconds ago".to_string()
    } else if secs < 90.0 {
        "a minute ago".to_string()
    } else if mins < 45.0 {
        format!("{mins} minutes ago")
    } else if mins < 90.0 {
        "an hour ago".to_string()
    } else if hours < 22.0 {
        format!("{hours} hours ago")
    } else if hours < 36.0 {
        "a day ago".to_string()
    } else if days < 26.0 {
        format!("{days} days ago")
    } else if days < 46.0 {
        "a month ago".to_string()
    } else if days < 320.0 {
        format!("{} months ago", (days / 30.4).round().max(2.0))
    } else if days < 548.0 {
        "a year ago".to_string()
    } else {
        format!("{} years ago", (days / 365.0).round().max(2.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn relative_time_buckets() {
        let now = Utc::now();
        let ago = |d: Duration| relative_time(now - d, now);

        assert_eq!(ago(Duration::seconds(10)), "a few seconds ago");
        assert_eq!(ago(Duration::seconds(60)), "a minute ago");
        assert_eq!(ago(Duration::minutes(5)), "5 minutes ago");
        assert_eq!(ago(Duration::minutes(60)), "an hour ago");
        assert_eq!(ago(Duration::hours(3)), "3 hours ago");
        assert_eq!(ago(Duration::hours(30)), "a day ago");
        assert_eq!(ago(Duration::days(4)), "4 days ago");
        assert_eq!(ago(Duration::days(30)), "a month ago");
        assert_eq!(ago(Duration::days(91)), "3 months ago");
        assert_eq!(ago(Duration::days(400)), "a year ago");
        assert_eq!(ago(Duration::days(365 * 3)), "3 years ago");
    }

    #[test]
    fn future_timestamps_read_as_just_now() {
        let now = Utc::now();
        assert_eq!(relative_time(now + Duration::minutes(2), now), "a few seconds ago");
    }
}
