//! Prompt templates for the two model calls in the pipeline. Both embed the
//! current date so the model can resolve relative dates ("yesterday", "last
//! week") to ISO calendar dates, and both are few-shot with the exact JSON
//! shapes the parsers expect.

use chrono::{Days, NaiveDate};

const INTENT_PROMPT_TEMPLATE: &str = r#"Classify the following user input and extract relevant fields.

Return a JSON object with:
- "intent": "query", "create", or "update"
- "job_title": if available
- "company": if available
- "status": if available
- "date": optional, ISO format if present
- "reference": optional, link or reference to the job posting
- "last_updated_time": optional, ISO format if present

Today is {today}.

Examples:
Input: "I applied to Backend Engineer at Amazon yesterday"
Output:
{
  "intent": "create",
  "job_title": "Backend Engineer",
  "company": "Amazon",
  "status": "Applied",
  "date": "{yesterday}"
}

Input: "Google Software Engineer just rejected me"
Output:
{
  "intent": "update",
  "job_title": "Software Engineer",
  "company": "Google",
  "status": "Rejected",
  "last_updated_time": "{today}"
}

Input: "I applied to Sales Consultant in Apple 3 days ago. Reference is https://www.apple.com/"
Output:
{
  "intent": "create",
  "job_title": "Sales Consultant",
  "company": "Apple",
  "status": "Applied",
  "reference": "https://www.apple.com/",
  "date": "{three_days_ago}"
}

Input: "{input}"
"#;

const FILTER_PROMPT_TEMPLATE: &str = r#"You are a system that converts natural language into a Notion filter JSON object.
Today is {today}. "Last week" is {last_week} to {today}.

Example:
Input: "What jobs did I apply last week?"
Output:
{
  "filter": {
    "and": [
      {"property": "Status", "status": {"equals": "Applied"}},
      {"property": "Date of application", "date": {"on_or_after": "{last_week}"}},
      {"property": "Date of application", "date": {"before": "{today}"}}
    ]
  }
}

Input: "Did I apply to analyst job in citi?"
Output:
{
  "filter": {
    "and": [
      {"property": "Status", "status": {"is_not_empty": true}},
      {"property": "Job", "title": {"contains": "Analyst"}},
      {"property": "Company", "rich_text": {"equals": "Citi"}}
    ]
  }
}

Input: "How many jobs did I apply?"
Output:
{
  "filter": {
    "property": "Status",
    "status": {
      "is_not_empty": true
    }
  }
}

Input: "What jobs did I apply in mastercard?"
Output:
{
  "filter": {
    "and": [
      {"property": "Status", "status": {"is_not_empty": true}},
      {"property": "Company", "rich_text": {"equals": "Mastercard"}}
    ]
  }
}

Now convert this input:
"{input}"
"#;

pub fn intent_prompt(input: &str, today: NaiveDate) -> String {
    INTENT_PROMPT_TEMPLATE
        .replace("{today}", &today.to_string())
        .replace("{yesterday}", &days_ago(today, 1).to_string())
        .replace("{three_days_ago}", &days_ago(today, 3).to_string())
        .replace("{input}", input)
}

pub fn filter_prompt(input: &str, today: NaiveDate) -> String {
    FILTER_PROMPT_TEMPLATE
        .replace("{today}", &today.to_string())
        .replace("{last_week}", &days_ago(today, 7).to_string())
        .replace("{input}", input)
}

fn days_ago(today: NaiveDate, days: u64) -> NaiveDate {
    // Subtraction only fails at the calendar boundary, far outside any
    // date this service will ever see.
    today.checked_sub_days(Days::new(days)).unwrap_or(today)
}
