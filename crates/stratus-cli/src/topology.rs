//! The ilikeyacut AWS infrastructure diagram.
//!
//! Edge styles: solid lines are synchronous calls, dashed lines are
//! asynchronous or cache traffic, dotted lines feed monitoring.

use stratus::{
    builder::{DiagramBuilder, EdgeSpec},
    kind::{aws, generic, onprem},
    semantic::{Diagram, Direction, OutputFormat},
    style::EdgeStyle,
};

pub const DIAGRAM_NAME: &str = "ilikeyacut AWS Infrastructure";
pub const FILENAME: &str = "aws_infrastructure_diagram";

fn labeled(label: &str) -> EdgeSpec {
    EdgeSpec::new().label(label)
}

fn dashed(label: &str) -> EdgeSpec {
    labeled(label).style(EdgeStyle::Dashed)
}

/// Builds the full diagram: 30 nodes in nested clusters and every edge
/// between them.
pub fn ilikeyacut_infrastructure() -> Diagram {
    DiagramBuilder::new(DIAGRAM_NAME)
        .filename(FILENAME)
        .direction(Direction::TopBottom)
        .format(OutputFormat::Png)
        .graph_attr("dpi", "300")
        .graph_attr("size", "20,16!")
        .graph_attr("ratio", "fill")
        .build(|d| {
            // External users and services
            let users = d.node("users", onprem::USERS, "iOS App Users");
            let mobile = d.node("mobile", generic::MOBILE, "ilikeyacut iOS App");

            let (cdn, alb) = d.cluster("Content Delivery", |c| {
                (
                    c.node("cdn", aws::CLOUDFRONT, "CloudFront CDN\nGlobal Distribution"),
                    c.node("alb", aws::ALB, "Application\nLoad Balancer"),
                )
            });

            let api = d.cluster("API Gateway", |c| {
                c.node("api", aws::API_GATEWAY, "REST API\nEndpoints")
            });

            let (cognito_pool, cognito_identity, iam, sts) = d.cluster("Authentication", |c| {
                (
                    c.node("cognito_pool", aws::COGNITO, "User Pool\nEmail/Social Auth"),
                    c.node("cognito_identity", aws::COGNITO, "Identity Pool\nFederated Access"),
                    c.node("iam", aws::IAM, "IAM Roles\n& Policies"),
                    c.node("sts", aws::STS, "STS\nTemp Credentials"),
                )
            });

            let (core, business) = d.cluster("Serverless Compute", |c| {
                let core = c.cluster("Core Functions", |c| {
                    (
                        c.node("auth_lambda", aws::LAMBDA, "Auth Service\nLogin/Signup"),
                        c.node("upload_lambda", aws::LAMBDA, "Upload Service\nImage Processing"),
                        c.node("ai_lambda", aws::LAMBDA, "AI Proxy\nGemini Integration"),
                    )
                });
                let business = c.cluster("Business Logic", |c| {
                    (
                        c.node("user_lambda", aws::LAMBDA, "User Management\nProfile/Settings"),
                        c.node("gallery_lambda", aws::LAMBDA, "Gallery Service\nTemplates/History"),
                        c.node("notification_lambda", aws::LAMBDA, "Notification\nPush/Email"),
                    )
                });
                (core, business)
            });
            let (auth_lambda, upload_lambda, ai_lambda) = core;
            let (user_lambda, gallery_lambda, notification_lambda) = business;

            let (buckets, tables) = d.cluster("Storage", |c| {
                let buckets = c.cluster("S3 Buckets", |c| {
                    (
                        c.node("template_bucket", aws::S3, "Hairstyle Templates\n50+ Presets"),
                        c.node("user_bucket", aws::S3, "User Images\nOriginal/Edited"),
                        c.node("static_bucket", aws::S3, "Static Assets\nIcons/Resources"),
                    )
                });
                let tables = c.cluster("Database", |c| {
                    (
                        c.node("user_table", aws::DYNAMODB, "Users Table\nProfiles"),
                        c.node("session_table", aws::DYNAMODB, "Sessions Table\nEdit History"),
                        c.node("gallery_table", aws::DYNAMODB, "Gallery Table\nMetadata"),
                    )
                });
                (buckets, tables)
            });
            let (template_bucket, user_bucket, static_bucket) = buckets;
            let (user_table, session_table, gallery_table) = tables;

            // Google Gemini sits outside AWS and is reached through the AI proxy.
            let sagemaker = d.cluster("AI Processing", |c| {
                c.node("sagemaker", aws::SAGEMAKER, "SageMaker\nEndpoint")
            });

            let (eventbridge, sqs_fifo, sqs_standard, sns_topic) = d.cluster("Event System", |c| {
                let eventbridge = c.node("eventbridge", aws::EVENTBRIDGE, "EventBridge\nScheduler");
                let (fifo, standard) = c.cluster("Queues", |c| {
                    (
                        c.node("sqs_fifo", aws::SQS, "FIFO Queue\nOrder Processing"),
                        c.node("sqs_standard", aws::SQS, "Standard Queue\nAsync Tasks"),
                    )
                });
                let sns = c.node("sns_topic", aws::SNS, "SNS Topics\nNotifications");
                (eventbridge, fifo, standard, sns)
            });

            let ((cloudwatch, xray, alarms), redis) = d.cluster("Operations", |c| {
                let monitoring = c.cluster("Monitoring", |c| {
                    (
                        c.node("cloudwatch", aws::CLOUDWATCH, "CloudWatch\nLogs & Metrics"),
                        c.node("xray", aws::XRAY, "X-Ray\nTracing"),
                        c.node("alarms", aws::CLOUDWATCH, "Alarms\nError Alerts"),
                    )
                });
                let redis = c.cluster("Caching", |c| {
                    c.node("redis", aws::ELASTICACHE, "Redis Cache\nSession Store")
                });
                (monitoring, redis)
            });

            // Entry path
            d.connect_with(users, mobile, &labeled("HTTPS"));
            d.connect_with(mobile, cdn, &labeled("API Calls"));
            d.connect(cdn, alb);
            d.connect(alb, api);

            // Authentication flow
            d.connect_with(api, auth_lambda, &labeled("Auth"));
            d.connect(auth_lambda, cognito_pool);
            d.connect(cognito_pool, cognito_identity);
            d.connect(cognito_identity, sts);
            d.connect_with(sts, iam, &labeled("Temp Creds"));

            // Image upload flow
            d.connect_with(api, upload_lambda, &labeled("Upload"));
            d.connect(upload_lambda, user_bucket);
            d.connect_with(upload_lambda, ai_lambda, &labeled("Process"));

            // AI processing
            d.connect_with(ai_lambda, sagemaker, &labeled("Inference"));
            d.connect_with(ai_lambda, sqs_standard, &dashed("Queue"));

            // User management
            d.connect_with(api, user_lambda, &labeled("User Ops"));
            d.connect(user_lambda, user_table);
            d.connect(user_lambda, redis);

            // Gallery operations
            d.connect_with(api, gallery_lambda, &labeled("Gallery"));
            d.connect(gallery_lambda, gallery_table);
            d.connect(gallery_lambda, template_bucket);
            d.connect(gallery_lambda, session_table);

            // Notification flow
            d.connect(notification_lambda, sns_topic);
            d.connect_with(sns_topic, mobile, &labeled("Push"));
            d.connect_with(eventbridge, notification_lambda, &labeled("Trigger"));

            // Event processing
            d.fan_out(sqs_standard, &[ai_lambda, notification_lambda], &dashed("Async"));
            d.connect_with(sqs_fifo, upload_lambda, &labeled("Ordered"));

            // Monitoring
            let observed = [auth_lambda, upload_lambda, ai_lambda, user_lambda, gallery_lambda];
            let dotted = EdgeSpec::new().style(EdgeStyle::Dotted);
            d.fan_in(&observed, cloudwatch, &dotted);
            d.connect_with(api, xray, &dotted);
            d.connect(cloudwatch, alarms);

            // Cache
            d.fan_in(&[user_lambda, gallery_lambda, auth_lambda], redis, &dashed("Cache"));

            // Static assets
            d.connect_with(cdn, static_bucket, &dashed("Static"));
        })
}
