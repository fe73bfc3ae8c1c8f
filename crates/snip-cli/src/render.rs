//! Terminal rendering of the grouped snippet view.

use chrono::Local;
use snip_core::snippet::Snippet;

use crate::group::{Bucket, View};

pub fn print_view(view: &View) {
  match view {
    View::NoSubjects => {
      println!(
        "No subjects defined yet. Add one with `snip subjects add <name>` to \
         organize your snippets."
      );
    }
    View::NoSnippets => {
      println!("No snippets yet. Add the first one with `snip add`.");
    }
    View::Grouped(buckets) => {
      for (i, bucket) in buckets.iter().enumerate() {
        if i > 0 {
          println!();
        }
        print_bucket(bucket);
      }
    }
  }
}

fn print_bucket(bucket: &Bucket) {
  println!("{}", bucket.name);
  println!("{}", "─".repeat(bucket.name.chars().count().max(4)));

  if bucket.snippets.is_empty() {
    println!("  (no snippets in this subject yet)");
    return;
  }
  for snippet in &bucket.snippets {
    print_entry(snippet);
  }
}

fn print_entry(snippet: &Snippet) {
  let stamp = snippet
    .created_at
    .with_timezone(&Local)
    .format("%Y-%m-%d %H:%M");
  println!("  #{}  {}  ({stamp})", snippet.id, snippet.title);
  for line in snippet.content.lines() {
    println!("      {line}");
  }
}

/// Full single-snippet view for `snip show`.
pub fn print_snippet(snippet: &Snippet) {
  let stamp = snippet
    .created_at
    .with_timezone(&Local)
    .format("%Y-%m-%d %H:%M:%S");
  println!("#{}  {}", snippet.id, snippet.title);
  println!("subject: {}", snippet.category);
  println!("created: {stamp}");
  println!();
  println!("{}", snippet.content);
}
