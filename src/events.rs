//! 进程内领域事件。
//!
//! 发帖积分走事件路径：发帖事务提交后投递 `PostCreatedEvent`，监听任务
//! 异步结算积分。尽力而为语义，结算失败只记日志，绝不影响已成功的发帖
//! 请求；进程内无重投递。

use crate::services::PointService;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub struct PostCreatedEvent {
    pub post_id: i64,
}

pub type PostEventSender = mpsc::UnboundedSender<PostCreatedEvent>;

pub fn post_event_channel() -> (PostEventSender, mpsc::UnboundedReceiver<PostCreatedEvent>) {
    mpsc::unbounded_channel()
}

/// 启动发帖事件监听任务
pub fn spawn_post_event_listener(
    point_service: PointService,
    mut rx: mpsc::UnboundedReceiver<PostCreatedEvent>,
) {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if let Err(e) = point_service.add_points_for_new_post(event.post_id).await {
                log::error!("Failed to add points for post {}: {e:?}", event.post_id);
            }
        }
    });
}
