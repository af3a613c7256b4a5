use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::content::{Author, AuthorId, Post, PostData, PostId, POSTS_COLLECTION};
use crate::content::category::Category;
use crate::content::schema::AuthorSet;

pub const POST_DATA: &str = r#"+++
title = "Deploying Astro on a VPS"
description = "From a laptop to a small VPS, with nginx in front"
author = "amruth"
pubDate = "2024-03-01 10:00"
category = "deploy"
tags = ["astro", "vps"]
+++

# Deploying Astro on a VPS

This is the body of the post.
"#;

pub const AUTHOR_DATA: &str = r#"name = "Amruth"
title = "Full stack developer"
bio = "Writing about Astro, web dev, and things I learn"
github = "https://github.com/AmruthLP12"
twitter = "https://x.com/AmruthLP12"
"#;

pub fn author(id: &str, name: &str) -> Author {
    Author {
        id: AuthorId(id.to_string()),
        name: name.to_string(),
        title: None,
        bio: format!("bio of {}", name),
        avatar: None,
        website: None,
        github: None,
        twitter: None,
        portfolio: None,
    }
}

pub fn author_set() -> AuthorSet {
    let amruth = author("amruth", "Amruth");
    let mut authors = AuthorSet::new();
    authors.insert(amruth.id.clone(), Arc::new(amruth));
    authors
}

pub fn post(slug: &str, author: &str, pub_date: &str) -> Post {
    Post {
        id: PostId(format!("{}.md", slug)),
        slug: slug.to_string(),
        body: format!("body-of-{}", slug),
        collection: POSTS_COLLECTION,
        data: PostData {
            title: format!("title-of-{}", slug),
            description: format!("summary-of-{}", slug),
            author: AuthorId(author.to_string()),
            purpose: None,
            pub_date: DateTime::parse_from_rfc3339(pub_date).unwrap().with_timezone(&Utc),
            updated_date: None,
            hero_image_dark: None,
            hero_image_light: None,
            category: None,
            tags: None,
        },
    }
}

pub fn tagged_post(slug: &str, author: &str, pub_date: &str, category: Category, tags: &[&str]) -> Post {
    let mut post = post(slug, author, pub_date);
    post.data.category = Some(category);
    post.data.tags = Some(tags.iter().map(|t| t.to_string()).collect());
    post
}
