///////////////////////////////////////////////////////////////////////
// Users
///////////////////////////////////////////////////////////////////////

table! {
    user (id) {
        id -> BigInt,
        username -> Text,
        pref_lang -> Text,
        contributions -> BigInt,
    }
}

///////////////////////////////////////////////////////////////////////
// Campaigns
///////////////////////////////////////////////////////////////////////

table! {
    campaign (id) {
        id -> BigInt,
        campaign_name -> Text,
        campaign_image -> Nullable<Text>,
        // JSON
        categories -> Text,
        start_date -> Text,
        end_date -> Nullable<Text>,
        manager -> Text,
        status -> Bool,
        short_description -> Text,
        long_description -> Text,
        creation_date -> Nullable<Text>,
        campaign_type -> Nullable<Bool>,
        depicts_metadata -> Bool,
        captions_metadata -> Bool,
    }
}

///////////////////////////////////////////////////////////////////////
// Contributions
///////////////////////////////////////////////////////////////////////

table! {
    contribution (id) {
        id -> BigInt,
        user_id -> BigInt,
        campaign_id -> BigInt,
        file -> Text,
        edit_type -> Text,
        edit_action -> Text,
        country -> Text,
        edit_content -> Text,
    }
}

joinable!(contribution -> user (user_id));
joinable!(contribution -> campaign (campaign_id));

allow_tables_to_appear_in_same_query!(user, campaign, contribution);
