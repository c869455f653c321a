//! Server-rendered HTML pages. Every user-supplied string goes through
//! `html_escape` before it is interpolated.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::models::{
    posts::PostView,
    profiles::ProfileDetails,
    users::UserResponse,
};
use crate::utils::pagination::Page;

const SCRIPT: &str = r#"<script>
document.addEventListener('click', async (event) => {
  const like = event.target.closest('[data-like]');
  if (like) {
    const res = await fetch('/like', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ post_id: Number(like.dataset.like) }),
    });
    if (res.ok) {
      const data = await res.json();
      like.querySelector('.count').textContent = data.likes;
      like.classList.toggle('liked', data.liked);
    }
    return;
  }
  const follow = event.target.closest('[data-follow]');
  if (follow) {
    const userId = Number(follow.dataset.follow);
    const res = await fetch('/profile/' + userId, {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ btn_value: follow.dataset.action, user_id: userId }),
    });
    if (res.ok) { window.location.reload(); }
  }
});
</script>"#;

fn layout(title: &str, user: Option<&UserResponse>, content: &str) -> String {
    let nav = match user {
        Some(user) => format!(
            r#"<a href="/profile/{id}"><strong>{name}</strong></a>
<a href="/">All Posts</a>
<a href="/following">Following</a>
<a href="/logout">Log Out</a>"#,
            id = user.id,
            name = encode_text(&user.username),
        ),
        None => r#"<a href="/">All Posts</a>
<a href="/login">Log In</a>
<a href="/register">Register</a>"#
            .to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<nav>{nav}</nav>
<main>
{content}
</main>
{script}
</body>
</html>"#,
        title = encode_text(title),
        nav = nav,
        content = content,
        script = SCRIPT,
    )
}

fn message_block(message: Option<&str>) -> String {
    message
        .map(|m| format!(r#"<div class="message">{}</div>"#, encode_text(m)))
        .unwrap_or_default()
}

fn post_card(post: &PostView, viewer: Option<&UserResponse>) -> String {
    let edit = match viewer {
        Some(viewer) if viewer.id == post.user_id => {
            format!(r#" <a href="/edit/{}">Edit</a>"#, post.id)
        }
        _ => String::new(),
    };
    let heart = if viewer.is_some() {
        format!(
            r#"<button data-like="{id}" class="{class}">&#9829; <span class="count">{likes}</span></button>"#,
            id = post.id,
            class = if post.liked_by_viewer { "liked" } else { "" },
            likes = post.likes,
        )
    } else {
        format!(r#"&#9829; <span class="count">{}</span>"#, post.likes)
    };

    format!(
        r#"<article class="post">
<a href="/profile/{user_id}"><strong>{username}</strong></a>
<p>{body}</p>
<small>{created}</small>{edit}
<div>{heart}</div>
</article>"#,
        user_id = post.user_id,
        username = encode_text(&post.username),
        body = encode_text(&post.body),
        created = post.created_at.format("%b %e, %Y, %l:%M %p"),
        edit = edit,
        heart = heart,
    )
}

fn pager(page: &Page<PostView>, base_path: &str) -> String {
    let mut links = Vec::new();
    if page.has_previous {
        links.push(format!(
            r#"<a href="{}?page={}">Previous</a>"#,
            base_path,
            page.current_page - 1
        ));
    }
    links.push(format!(
        "<span>Page {} of {}</span>",
        page.current_page, page.total_pages
    ));
    if page.has_next {
        links.push(format!(
            r#"<a href="{}?page={}">Next</a>"#,
            base_path,
            page.current_page + 1
        ));
    }
    format!(r#"<div class="pager">{}</div>"#, links.join(" "))
}

fn post_form(action: &str, value: &str, submit: &str) -> String {
    format!(
        r#"<form action="{action}" method="post">
<textarea name="post" maxlength="5000" required>{value}</textarea>
<button type="submit">{submit}</button>
</form>"#,
        action = encode_double_quoted_attribute(action),
        value = encode_text(value),
        submit = encode_text(submit),
    )
}

/// The "All Posts" and "Following" listings. `message` is shown above the
/// posts when the previous request was rejected.
pub fn post_list_page(
    heading: &str,
    base_path: &str,
    viewer: Option<&UserResponse>,
    page: &Page<PostView>,
    show_form: bool,
    message: Option<&str>,
) -> String {
    let form = if show_form && viewer.is_some() {
        format!("<h2>New Post</h2>\n{}", post_form("/", "", "Post"))
    } else {
        String::new()
    };
    let posts: String = page.items.iter().map(|p| post_card(p, viewer)).collect();

    let content = format!(
        "<h1>{}</h1>\n{}\n{}\n{}\n{}",
        encode_text(heading),
        message_block(message),
        form,
        posts,
        pager(page, base_path)
    );
    layout(heading, viewer, &content)
}

pub fn login_page(message: Option<&str>) -> String {
    let content = format!(
        r#"<h2>Login</h2>
{message}
<form action="/login" method="post">
<input autofocus type="text" name="username" placeholder="Username">
<input type="password" name="password" placeholder="Password">
<button type="submit">Login</button>
</form>
Don't have an account? <a href="/register">Register here.</a>"#,
        message = message_block(message),
    );
    layout("Login", None, &content)
}

pub fn register_page(message: Option<&str>) -> String {
    let content = format!(
        r#"<h2>Register</h2>
{message}
<form action="/register" method="post">
<input autofocus type="text" name="username" placeholder="Username">
<input type="email" name="email" placeholder="Email Address">
<input type="password" name="password" placeholder="Password">
<input type="password" name="confirmation" placeholder="Confirm Password">
<button type="submit">Register</button>
</form>
Already have an account? <a href="/login">Log In here.</a>"#,
        message = message_block(message),
    );
    layout("Register", None, &content)
}

pub fn profile_page(viewer: Option<&UserResponse>, profile: &ProfileDetails) -> String {
    let button = match profile.viewer_follows {
        Some(follows) => {
            let (action, label) = if follows {
                ("unfollow", "Unfollow")
            } else {
                ("follow", "Follow")
            };
            format!(
                r#"<button data-follow="{}" data-action="{}">{}</button>"#,
                profile.user.id, action, label
            )
        }
        None => String::new(),
    };
    let following: String = profile
        .following
        .iter()
        .map(|u| {
            format!(
                r#"<li><a href="/profile/{}">{}</a></li>"#,
                u.id,
                encode_text(&u.username)
            )
        })
        .collect();
    let posts: String = profile.posts.iter().map(|p| post_card(p, viewer)).collect();

    let content = format!(
        r#"<h1>{name}</h1>
{button}
<p>Followers: {followers} &middot; Following: {following_count}</p>
<h3>Following</h3>
<ul>{following}</ul>
<h3>Posts</h3>
{posts}"#,
        name = encode_text(&profile.user.username),
        button = button,
        followers = profile.counts.follower_count,
        following_count = profile.counts.following_count,
        following = following,
        posts = posts,
    );
    layout(&profile.user.username, viewer, &content)
}

/// Edit form for post `post_id`, prefilled with `body`.
pub fn edit_page(
    viewer: &UserResponse,
    post_id: i64,
    body: &str,
    message: Option<&str>,
) -> String {
    let content = format!(
        "<h2>Edit Post</h2>\n{}\n{}",
        message_block(message),
        post_form(&format!("/edit/{}", post_id), body, "Save")
    );
    layout("Edit Post", Some(viewer), &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post(user_id: i64, body: &str) -> PostView {
        PostView {
            id: 1,
            user_id,
            username: "<b>alice</b>".to_string(),
            body: body.to_string(),
            created_at: Utc::now(),
            updated_at: None,
            likes: 3,
            liked_by_viewer: false,
        }
    }

    #[test]
    fn escapes_user_content() {
        let card = post_card(&post(1, "<script>alert(1)</script>"), None);
        assert!(!card.contains("<script>alert(1)"));
        assert!(card.contains("&lt;script&gt;"));
        assert!(card.contains("&lt;b&gt;alice"));
    }

    #[test]
    fn edit_link_only_for_owner() {
        let owner = UserResponse {
            id: 1,
            username: "alice".to_string(),
        };
        let other = UserResponse {
            id: 2,
            username: "bob".to_string(),
        };
        assert!(post_card(&post(1, "hi"), Some(&owner)).contains("/edit/1"));
        assert!(!post_card(&post(1, "hi"), Some(&other)).contains("/edit/1"));
    }

    #[test]
    fn login_page_shows_message() {
        let html = login_page(Some("Invalid username and/or password."));
        assert!(html.contains("Invalid username and/or password."));
    }

    #[test]
    fn listing_shows_rejection_message() {
        let page = crate::utils::pagination::PageWindow::resolve(1, 1, 10)
            .unwrap()
            .into_page(vec![post(1, "hi")], 1);
        let html = post_list_page("All Posts", "/", None, &page, true, Some("Post <b>"));
        assert!(html.contains(r#"<div class="message">Post &lt;b&gt;</div>"#));
    }

    #[test]
    fn edit_page_keeps_the_draft() {
        let viewer = UserResponse {
            id: 1,
            username: "alice".to_string(),
        };
        let html = edit_page(&viewer, 4, "draft & more", Some("Post cannot be empty"));
        assert!(html.contains(r#"action="/edit/4""#));
        assert!(html.contains("draft &amp; more"));
        assert!(html.contains("Post cannot be empty"));
    }
}
